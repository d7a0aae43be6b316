//! Where stack templates come from.

use std::borrow::Cow;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PambaseError, PambaseResult};
use crate::stack::StackName;

const BUILTIN_TEMPLATES: [(StackName, &str); 9] = [
    (StackName::Login, include_str!("../../templates/login.tera")),
    (StackName::Other, include_str!("../../templates/other.tera")),
    (StackName::Passwd, include_str!("../../templates/passwd.tera")),
    (
        StackName::SystemLocalLogin,
        include_str!("../../templates/system-local-login.tera"),
    ),
    (
        StackName::SystemRemoteLogin,
        include_str!("../../templates/system-remote-login.tera"),
    ),
    (StackName::Su, include_str!("../../templates/su.tera")),
    (
        StackName::SystemAuth,
        include_str!("../../templates/system-auth.tera"),
    ),
    (
        StackName::SystemLogin,
        include_str!("../../templates/system-login.tera"),
    ),
    (
        StackName::SystemServices,
        include_str!("../../templates/system-services.tera"),
    ),
];

/// Source of the stack templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateStore {
    /// Templates compiled into the binary.
    #[default]
    Builtin,
    /// `<dir>/<stack>.tera` files read at runtime.
    Directory(PathBuf),
}

impl TemplateStore {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    /// Load the template source for one stack.
    pub fn load(&self, stack: StackName) -> PambaseResult<Cow<'static, str>> {
        match self {
            TemplateStore::Builtin => BUILTIN_TEMPLATES
                .iter()
                .find(|(name, _)| *name == stack)
                .map(|(_, source)| Cow::Borrowed(*source))
                .ok_or_else(|| self.not_found(stack)),
            TemplateStore::Directory(dir) => load_from_dir(dir, stack)
                .map(Cow::Owned)
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => self.not_found(stack),
                    _ => PambaseError::io(dir.join(stack.template_file()), e),
                }),
        }
    }

    fn not_found(&self, stack: StackName) -> PambaseError {
        PambaseError::TemplateNotFound {
            name: stack.template_file(),
            location: self.to_string(),
        }
    }
}

impl fmt::Display for TemplateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateStore::Builtin => f.write_str("built-in templates"),
            TemplateStore::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

fn load_from_dir(dir: &Path, stack: StackName) -> std::io::Result<String> {
    let path = dir.join(stack.template_file());
    tracing::debug!(path = %path.display(), "Loading stack template");
    std::fs::read_to_string(path)
}
