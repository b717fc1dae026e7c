use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use std::path::Path;
use zeroize::Zeroizing;

pub const PASSPHRASE_ENV: &str = "PASSEAL_PASSPHRASE";

/// Reads the passphrase used to open an envelope.
///
/// Stdin is left alone because it may carry the data being processed.
pub fn read_passphrase(file: Option<&Path>) -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env_or_file(file)? {
        return Ok(pw);
    }

    if io::stdin().is_terminal() {
        let pw = Zeroizing::new(rpassword::prompt_password("Passphrase: ")?);
        if !pw.is_empty() {
            return Ok(pw);
        }
    }

    bail!("passphrase missing")
}

/// Reads the passphrase for a new envelope, confirming it when typed.
pub fn read_new_passphrase(file: Option<&Path>) -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env_or_file(file)? {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        bail!("passphrase missing");
    }

    let pw1 = Zeroizing::new(rpassword::prompt_password("New passphrase: ")?);
    let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm passphrase: ")?);

    if pw1.is_empty() {
        bail!("passphrase cannot be empty");
    }

    if pw1 != pw2 {
        bail!("passphrases do not match");
    }

    Ok(pw1)
}

fn from_env_or_file(file: Option<&Path>) -> Result<Option<Zeroizing<String>>> {
    //  PASSEAL_PASSPHRASE="supersecret" passeal decrypt ...
    if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
        let pw = Zeroizing::new(pw);
        if !pw.is_empty() {
            return Ok(Some(pw));
        }
    }

    if let Some(path) = file {
        let mut pw = Zeroizing::new(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read passphrase file {}", path.display()))?,
        );
        trim_newline(&mut pw);

        if pw.is_empty() {
            bail!("passphrase file {} is empty", path.display());
        }
        return Ok(Some(pw));
    }

    Ok(None)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn trim_newline_strips_line_endings_only() {
        let mut s = String::from(" pw \r\n\n");
        trim_newline(&mut s);
        assert_eq!(s, " pw ");
    }

    #[test]
    fn passphrase_file_is_read_without_newline() {
        if std::env::var_os(PASSPHRASE_ENV).is_some() {
            return;
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("pw.txt");
        std::fs::write(&path, "from file\n").unwrap();

        let pw = from_env_or_file(Some(path.as_path())).unwrap().unwrap();
        assert_eq!(pw.as_str(), "from file");
    }

    #[test]
    fn empty_passphrase_file_fails() {
        if std::env::var_os(PASSPHRASE_ENV).is_some() {
            return;
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("pw.txt");
        std::fs::write(&path, "\n").unwrap();

        assert!(from_env_or_file(Some(path.as_path())).is_err());
    }
}
