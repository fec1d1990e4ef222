//! # JQL Builders
//!
//! Every caller-supplied value is quoted before it is spliced into a query,
//! so usernames, emails or epic keys containing quotes, spaces or JQL
//! operators cannot change the shape of the query.

/// Quote a value or field name as a JQL string literal.
///
/// Wraps in double quotes and backslash-escapes `\` and `"`.
pub fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for ch in value.chars() {
    if ch == '"' || ch == '\\' {
      quoted.push('\\');
    }
    quoted.push(ch);
  }
  quoted.push('"');
  quoted
}

/// Issues assigned to `assignee` (username, account id or email)
pub fn assigned_to(assignee: &str) -> String {
  format!("assignee = {}", quote(assignee))
}

/// Issues assigned to `assignee` within one Program Increment
pub fn assigned_in_program_increment(assignee: &str, pi_field: &str, pi: &str) -> String {
  format!("{} AND {} = {}", assigned_to(assignee), quote(pi_field), quote(pi))
}

/// Issues linked to an epic
pub fn linked_to_epic(epic_link_field: &str, epic_key: &str) -> String {
  format!("{} = {}", quote(epic_link_field), quote(epic_key))
}
