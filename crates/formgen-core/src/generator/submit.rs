//! Submission strategy selection
//!
//! Chooses how the generated component submits its data and emits the body
//! of its `onSubmit` handler. Loading state and error display wrap whichever
//! strategy is chosen: the loading flag is released in a `finally` block so
//! it resets on every exit path.

use super::fragment::{js_string, Fragment};
use super::naming::Names;
use crate::spec::FormSpec;

/// Code path used when the form is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Call the colocated server action and branch on its `success` flag
    Delegated,
    /// POST to the form's endpoint and branch on the decoded `success` flag
    RemoteEndpoint,
    /// Log the payload and report success immediately
    LocalLog,
}

/// Selected strategy plus the state handling around it
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    pub strategy: Strategy,
    pub loading_state: bool,
    pub error_display: bool,
    pub success_message: String,
    pub error_message: String,
}

impl SubmissionPlan {
    /// Pick the strategy in priority order: delegated, remote, local
    pub fn select(spec: &FormSpec) -> Self {
        let strategy = if spec.delegated_submission {
            Strategy::Delegated
        } else if spec.persistence.is_some() {
            Strategy::RemoteEndpoint
        } else {
            Strategy::LocalLog
        };

        Self {
            strategy,
            loading_state: spec.loading_state,
            error_display: spec.error_display,
            success_message: spec.success_message.clone(),
            error_message: spec.error_message.clone(),
        }
    }

    /// `useState` hooks the handler relies on
    pub fn state_hooks(&self) -> Fragment {
        Fragment::seq([
            Fragment::when(self.loading_state, || {
                Fragment::line("const [isSubmitting, setIsSubmitting] = useState(false);")
            }),
            Fragment::when(self.error_display, || {
                Fragment::line("const [error, setError] = useState(\"\");")
            }),
            Fragment::line("const [successMessage, setSuccessMessage] = useState(\"\");"),
        ])
    }

    /// Body of the `onSubmit` handler
    pub fn emit(&self, names: &Names) -> Fragment {
        let fallback = js_string(&self.error_message);

        let catch = Fragment::seq([
            Fragment::line("console.error(\"Form submission error:\", error);"),
            Fragment::when(self.error_display, || {
                Fragment::line(format!(
                    "setError(error instanceof Error && error.message ? error.message : {});",
                    fallback
                ))
            }),
        ]);

        Fragment::seq([
            Fragment::when(self.loading_state, || Fragment::line("setIsSubmitting(true);")),
            Fragment::when(self.error_display, || Fragment::line("setError(\"\");")),
            Fragment::line("setSuccessMessage(\"\");"),
            Fragment::block("try {", self.strategy_body(names), "} catch (error) {"),
            Fragment::indent(catch),
            if self.loading_state {
                Fragment::block("} finally {", Fragment::line("setIsSubmitting(false);"), "}")
            } else {
                Fragment::line("}")
            },
        ])
    }

    fn strategy_body(&self, names: &Names) -> Fragment {
        let on_success = Fragment::seq([
            Fragment::line(format!(
                "setSuccessMessage({});",
                js_string(&self.success_message)
            )),
            Fragment::line("form.reset();"),
        ]);
        let check_result = Fragment::block(
            "if (!result.success) {",
            Fragment::line(format!(
                "throw new Error(result.error || {});",
                js_string(&self.error_message)
            )),
            "}",
        );

        match self.strategy {
            Strategy::Delegated => Fragment::seq([
                Fragment::line(format!(
                    "const result = await {}(data);",
                    names.action_symbol()
                )),
                check_result,
                on_success,
            ]),
            Strategy::RemoteEndpoint => Fragment::seq([
                Fragment::block(
                    format!(
                        "const response = await fetch({}, {{",
                        js_string(&names.endpoint_url())
                    ),
                    Fragment::seq([
                        Fragment::line("method: \"POST\","),
                        Fragment::line("headers: { \"Content-Type\": \"application/json\" },"),
                        Fragment::line("body: JSON.stringify(data),"),
                    ]),
                    "});",
                ),
                Fragment::line("const result = await response.json();"),
                check_result,
                on_success,
            ]),
            Strategy::LocalLog => Fragment::seq([
                Fragment::line(format!(
                    "console.log({}, data);",
                    js_string(&format!("{} submission:", names.form()))
                )),
                on_success,
            ]),
        }
    }
}
