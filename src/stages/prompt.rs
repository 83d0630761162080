//! System instructions and input templates for the LLM-backed stages.

pub const TEST_CASE_SYSTEM: &str = "You are an expert Test Case Generation Agent. Your task is to transform provided \
     software requirements and user stories into comprehensive, structured test cases. \
     Each test case should include a unique ID, description, preconditions, steps, expected results, \
     and priority. Aim for clear, atomic, and testable cases. Output in Markdown table format.";

pub const TEST_DATA_SYSTEM: &str = "You are an expert Test Data Generation Agent. Given a set of test cases and data \
     constraints (e.g., string length, numeric range, data types, specific formats like email/URL), \
     generate diverse test data including valid, invalid, boundary, and edge cases. \
     Output as a well-formatted JSON string with keys as field names and values as lists of example inputs.";

pub const AUTOMATION_SYSTEM: &str = "You are an expert Test Script Automation Agent. Given structured test cases, \
     generate automated test scripts using the specified test automation framework.\n\n\
     Framework options may include Python Playwright, Java Selenium, JavaScript Cypress, \
     Postman collection, or Pytest. Follow best practices for the selected framework, \
     and assume necessary dependencies are already installed.\n\n\
     Return only valid runnable code blocks with comments as needed.";

pub const SELF_HEALING_SYSTEM: &str = "You are a Self-Healing Test Script Agent. When provided with failed test script logs \
     and an updated UI/API state, analyze the differences and modify the existing automation \
     scripts to adapt to the new elements (e.g., locator changes, API endpoint shifts). \
     Provide the updated script.";

pub const BUG_REPORT_SYSTEM: &str = "You are an expert Bug Report Generation Agent. Given raw issue logs, \
     extract relevant information to create structured, consistent, and prioritized bug reports.\n\n\
     Each report must include the following fields:\n\
     - **Title**\n- **Description**\n- **Steps to Reproduce**\n\
     - **Expected vs. Actual Results**\n- **Environment**\n\
     - **Severity** (Critical, Major, Minor)\n- **Priority** (High, Medium, Low)\n\n\
     Output as a Markdown-formatted list of bug reports with appropriate headings and bullet points.";

pub const TEST_SUMMARY_SYSTEM: &str = "You are an expert Test Summary Report Agent. Consolidate test execution results, \
     bug reports, and test coverage information into a clear, concise, and structured \
     test summary report.\n\n\
     The report should include:\n\
     - Overall test execution statistics (pass/fail rate, total tests)\n\
     - Highlights of critical bugs or regressions\n\
     - Summary of test coverage and areas not tested\n\
     - Observations and risks\n\
     - Recommendations for improvement or next steps\n\n\
     Output the report in clean Markdown format with proper headings and bullet points.";

pub const RELEASE_READINESS_SYSTEM: &str = "You are a Release Readiness Advisor Agent. Based on aggregated test results, \
     bug reports (severity, status), code quality metrics, and predefined release \
     criteria, assess the overall release readiness of the software.\n\n\
     Provide a clear, actionable recommendation as one of the following:\n\
     - 'Ready for Release'\n- 'Proceed with Caution'\n- 'Not Ready'\n\n\
     Justify your recommendation using:\n\
     - Test results (pass/fail rate, regressions)\n\
     - Bug status and severity\n\
     - Code quality metrics (coverage, linting, static analysis)\n\
     - Any known risks or gaps\n\n\
     Respond with a concise and well-formatted Markdown summary.";

pub fn test_case_input(requirements: &str, user_stories: &str) -> String {
    format!(
        "Below are software requirements and user stories. \
         Generate structured test cases in a Markdown table with the following columns: \
         Test ID, Description, Preconditions, Steps, Expected Result, Priority.\n\n\
         Software Requirements:\n{requirements}\n\nUser Stories:\n{user_stories}"
    )
}

pub fn test_data_input(test_cases: &str, constraints: &str) -> String {
    format!(
        "Based on the test case summary and data constraints below, generate test data covering:\n\
         - Valid values\n\
         - Invalid values\n\
         - Boundary values\n\
         - Edge cases\n\n\
         Output format: JSON with fields and arrays of values.\n\n\
         Test Case Summary:\n{test_cases}\n\nConstraints:\n{constraints}"
    )
}

pub fn automation_input(test_cases: &str, framework: &str) -> String {
    format!(
        "Transform the following structured test cases into automated test scripts using the \
         framework: {framework}.\n\n\
         Follow best practices and generate runnable code only.\n\n\
         Test Cases:\n{test_cases}"
    )
}

pub fn self_healing_input(original_script: &str, failure_log: &str, ui_api_state: &str) -> String {
    format!(
        "The automated test script below failed. Analyze the failure log against the current \
         UI/API state and produce an updated script adapted to the changed elements.\n\n\
         Original Script:\n{original_script}\n\n\
         Failure Log:\n{failure_log}\n\n\
         Current UI/API State:\n{ui_api_state}"
    )
}

pub fn bug_report_input(raw_logs: &str) -> String {
    format!(
        "Transform the following raw issue logs into structured bug reports in Markdown format. \
         Each report must include Title, Description, Steps to Reproduce, Expected vs. Actual \
         Results, Environment, Severity, and Priority.\n\n\
         Raw Logs:\n{raw_logs}"
    )
}

pub fn test_summary_input(execution_data: &str, bug_reports: &str, test_coverage: &str) -> String {
    format!(
        "Based on the following data, generate a professional and concise test summary report:\n\n\
         ### Test Execution Data:\n{execution_data}\n\n\
         ### Bug Reports:\n{bug_reports}\n\n\
         ### Test Coverage Info:\n{test_coverage}"
    )
}

pub fn release_readiness_input(
    test_summary: &str,
    bug_summary: &str,
    quality_metrics: &str,
) -> String {
    format!(
        "Please assess release readiness based on the following inputs:\n\n\
         ### Test Summary:\n{test_summary}\n\n\
         ### Bug Summary:\n{bug_summary}\n\n\
         ### Code Quality Metrics:\n{quality_metrics}\n\n\
         Provide a final recommendation and rationale in Markdown format."
    )
}
