//! Canned diagnostic collaborators.
//!
//! Stand-ins for a live test environment and a bug tracker. The self-healing
//! stage reads the UI/API state diff; bug report generation pulls the issue
//! log excerpt.

/// Current UI element structure and API schema, as a live environment probe
/// would report it.
pub fn current_ui_state() -> &'static str {
    "Simulated UI State: Login button changed from 'btn-login' to 'main-login-btn'. \
     Password field ID unchanged. API endpoint '/users' now '/api/v1/users'."
}

/// Raw issue logs, as a bug tracking system would export them.
pub fn fetch_issue_logs() -> &'static str {
    r#"Issue 1: User cannot login with valid credentials. Error: "Invalid username or password".
Issue 2: Search functionality broken for special characters.
Issue 3: Checkout button occasionally unresponsive on mobile.
Issue 4: Typo in 'Welcome' message after successful login."#
}
