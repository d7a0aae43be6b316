//! The nine PAM service stacks the generator produces.

use std::fmt;

/// Logical name of a generated stack. Doubles as the template name and the
/// output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StackName {
    Login,
    Other,
    Passwd,
    SystemLocalLogin,
    SystemRemoteLogin,
    Su,
    SystemAuth,
    SystemLogin,
    SystemServices,
}

impl StackName {
    /// Every stack, in generation order.
    pub const ALL: [StackName; 9] = [
        StackName::Login,
        StackName::Other,
        StackName::Passwd,
        StackName::SystemLocalLogin,
        StackName::SystemRemoteLogin,
        StackName::Su,
        StackName::SystemAuth,
        StackName::SystemLogin,
        StackName::SystemServices,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StackName::Login => "login",
            StackName::Other => "other",
            StackName::Passwd => "passwd",
            StackName::SystemLocalLogin => "system-local-login",
            StackName::SystemRemoteLogin => "system-remote-login",
            StackName::Su => "su",
            StackName::SystemAuth => "system-auth",
            StackName::SystemLogin => "system-login",
            StackName::SystemServices => "system-services",
        }
    }

    /// File name of the template that renders this stack.
    pub fn template_file(self) -> String {
        format!("{}.tera", self.as_str())
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
