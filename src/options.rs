//! Stack options: the optional PAM modules, the password hash algorithm and the
//! global toggles that together select what goes into each generated stack.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PambaseError;

/// Optional PAM modules that can be switched on from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PamModule {
    GnomeKeyring,
    Caps,
    Passwdqc,
    Pwhistory,
    Pwquality,
    Openrc,
    Elogind,
    Systemd,
    Homed,
    Selinux,
    Mktemp,
    PamSsh,
    Securetty,
    Shells,
    Sssd,
    Krb5,
}

impl PamModule {
    pub const ALL: [PamModule; 16] = [
        PamModule::GnomeKeyring,
        PamModule::Caps,
        PamModule::Passwdqc,
        PamModule::Pwhistory,
        PamModule::Pwquality,
        PamModule::Openrc,
        PamModule::Elogind,
        PamModule::Systemd,
        PamModule::Homed,
        PamModule::Selinux,
        PamModule::Mktemp,
        PamModule::PamSsh,
        PamModule::Securetty,
        PamModule::Shells,
        PamModule::Sssd,
        PamModule::Krb5,
    ];

    /// Variable name the templates test for this module.
    pub fn context_key(self) -> &'static str {
        match self {
            PamModule::GnomeKeyring => "gnome_keyring",
            PamModule::Caps => "caps",
            PamModule::Passwdqc => "passwdqc",
            PamModule::Pwhistory => "pwhistory",
            PamModule::Pwquality => "pwquality",
            PamModule::Openrc => "openrc",
            PamModule::Elogind => "elogind",
            PamModule::Systemd => "systemd",
            PamModule::Homed => "homed",
            PamModule::Selinux => "selinux",
            PamModule::Mktemp => "mktemp",
            PamModule::PamSsh => "pam_ssh",
            PamModule::Securetty => "securetty",
            PamModule::Shells => "shells",
            PamModule::Sssd => "sssd",
            PamModule::Krb5 => "krb5",
        }
    }

    /// Long command-line flag, without the leading dashes.
    pub fn flag(self) -> &'static str {
        match self {
            PamModule::GnomeKeyring => "gnome-keyring",
            PamModule::PamSsh => "pam-ssh",
            other => other.context_key(),
        }
    }

    /// Shared object the module flag enables.
    pub fn shared_object(self) -> &'static str {
        match self {
            PamModule::GnomeKeyring => "pam_gnome_keyring.so",
            PamModule::Caps => "pam_cap.so",
            PamModule::Passwdqc => "pam_passwdqc.so",
            PamModule::Pwhistory => "pam_pwhistory.so",
            PamModule::Pwquality => "pam_pwquality.so",
            PamModule::Openrc => "pam_openrc.so",
            PamModule::Elogind => "pam_elogind.so",
            PamModule::Systemd => "pam_systemd.so",
            PamModule::Homed => "pam_systemd_home.so",
            PamModule::Selinux => "pam_selinux.so",
            PamModule::Mktemp => "pam_mktemp.so",
            PamModule::PamSsh => "pam_ssh.so",
            PamModule::Securetty => "pam_securetty.so",
            PamModule::Shells => "pam_shells.so",
            PamModule::Sssd => "pam_sss.so",
            PamModule::Krb5 => "pam_krb5.so",
        }
    }
}

impl fmt::Display for PamModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Hash used by `pam_unix.so` for stored passwords.
///
/// The lowercase name doubles as the `pam_unix.so` option that selects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha256,
    Sha512,
    Blowfish,
    GostYescrypt,
    Yescrypt,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blowfish,
        HashAlgorithm::GostYescrypt,
        HashAlgorithm::Yescrypt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blowfish => "blowfish",
            HashAlgorithm::GostYescrypt => "gost_yescrypt",
            HashAlgorithm::Yescrypt => "yescrypt",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = PambaseError;

    /// Parse an algorithm name. Matching is exact: the names are passed through
    /// to `pam_unix.so` verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| {
                PambaseError::usage(format!(
                    "unknown password hash '{}'. Valid values: {}",
                    s,
                    HashAlgorithm::ALL.map(HashAlgorithm::as_str).join(", ")
                ))
            })
    }
}

/// Everything the user selected for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackOptions {
    modules: BTreeSet<PamModule>,
    /// Hash for passwords written by `pam_unix.so`.
    pub encrypt: HashAlgorithm,
    /// Leave out everything but the essential modules.
    pub minimal: bool,
    /// Pass `debug` to the modules that accept it.
    pub debug: bool,
    /// Pass `nullok` to `pam_unix.so`.
    pub nullok: bool,
}

impl StackOptions {
    /// Enable a module, returning `self` for chaining.
    pub fn with_module(mut self, module: PamModule) -> Self {
        self.modules.insert(module);
        self
    }

    pub fn with_encrypt(mut self, encrypt: HashAlgorithm) -> Self {
        self.encrypt = encrypt;
        self
    }

    pub fn with_minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_nullok(mut self, nullok: bool) -> Self {
        self.nullok = nullok;
        self
    }

    pub fn enable(&mut self, module: PamModule) {
        self.modules.insert(module);
    }

    pub fn is_enabled(&self, module: PamModule) -> bool {
        self.modules.contains(&module)
    }

    /// Token substituted for `{{ debug }}`.
    pub fn debug_token(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            ""
        }
    }

    /// Token substituted for `{{ nullok }}`.
    pub fn nullok_token(&self) -> &'static str {
        if self.nullok {
            "nullok"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hash_algorithm_valid() {
        let names = [
            "md5",
            "sha256",
            "sha512",
            "blowfish",
            "gost_yescrypt",
            "yescrypt",
        ];
        for (alg, name) in HashAlgorithm::ALL.iter().zip(names) {
            assert_eq!(name.parse::<HashAlgorithm>().unwrap(), *alg);
            assert_eq!(alg.to_string(), name);
        }
    }

    #[test]
    fn test_parse_hash_algorithm_invalid() {
        let err = "des".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, PambaseError::Usage(_)));
        assert!(err.to_string().contains("gost_yescrypt"));
    }

    #[test]
    fn test_parse_hash_algorithm_is_case_sensitive() {
        assert!("SHA512".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_hash_algorithm_serializes_as_pam_option() {
        let value = serde_json::to_value(HashAlgorithm::GostYescrypt).unwrap();
        assert_eq!(value, serde_json::json!("gost_yescrypt"));
    }

    #[test]
    fn test_default_options() {
        let options = StackOptions::default();
        assert_eq!(options.encrypt, HashAlgorithm::Md5);
        assert!(!options.minimal);
        assert_eq!(options.debug_token(), "");
        assert_eq!(options.nullok_token(), "");
        assert!(PamModule::ALL.iter().all(|m| !options.is_enabled(*m)));
    }

    #[test]
    fn test_tokens_when_enabled() {
        let options = StackOptions::default().with_debug(true).with_nullok(true);
        assert_eq!(options.debug_token(), "debug");
        assert_eq!(options.nullok_token(), "nullok");
    }

    #[test]
    fn test_builder_setters() {
        let options = StackOptions::default()
            .with_encrypt(HashAlgorithm::Sha512)
            .with_minimal(true)
            .with_debug(true)
            .with_nullok(false)
            .with_module(PamModule::Openrc);
        assert_eq!(options.encrypt, HashAlgorithm::Sha512);
        assert!(options.minimal);
        assert!(options.debug);
        assert!(!options.nullok);
        assert!(options.is_enabled(PamModule::Openrc));

        let mut enabled = options.clone();
        enabled.enable(PamModule::Krb5);
        assert_eq!(enabled, options.with_module(PamModule::Krb5));
    }

    #[test]
    fn test_with_module() {
        let options = StackOptions::default()
            .with_module(PamModule::Sssd)
            .with_module(PamModule::Caps)
            .with_module(PamModule::Sssd);
        assert!(options.is_enabled(PamModule::Sssd));
        assert!(options.is_enabled(PamModule::Caps));
        assert!(!options.is_enabled(PamModule::Krb5));
        assert_eq!(
            options,
            StackOptions::default()
                .with_module(PamModule::Caps)
                .with_module(PamModule::Sssd)
        );
    }

    #[test]
    fn test_module_names_are_distinct() {
        let keys: BTreeSet<_> = PamModule::ALL.iter().map(|m| m.context_key()).collect();
        let flags: BTreeSet<_> = PamModule::ALL.iter().map(|m| m.flag()).collect();
        assert_eq!(keys.len(), PamModule::ALL.len());
        assert_eq!(flags.len(), PamModule::ALL.len());
    }

    #[test]
    fn test_module_flags() {
        assert_eq!(PamModule::GnomeKeyring.flag(), "gnome-keyring");
        assert_eq!(PamModule::PamSsh.flag(), "pam-ssh");
        assert_eq!(PamModule::PamSsh.context_key(), "pam_ssh");
        assert_eq!(PamModule::Homed.shared_object(), "pam_systemd_home.so");
    }
}
