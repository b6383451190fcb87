use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{5,18}[0-9]$").expect("Invalid phone regex"));

/// 用户名：5 到 16 个字符，字母、数字以及 `_ . @ + -`
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(5..=16).contains(&len) {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may only contain letters, digits and _ . @ + -");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

const COMMON_PASSWORDS: [&str; 8] = [
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
    "student1",
];

/// 密码策略：至少 8 位，包含大写、小写字母和数字，且不在常见弱口令表中
///
/// 返回所有未满足的条目，便于一次性提示。
pub fn password_policy_violations(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if COMMON_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common");
    }

    errors
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let errors = password_policy_violations(password);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("r.sharma@9").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("this-name-is-far-too-long").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("teacher@school.edu").is_ok());
        assert!(validate_email("teacher@school").is_err());
        assert!(validate_phone("+91 98765-43210").is_ok());
        assert!(validate_phone("12ab").is_err());
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(validate_password("Campus2024").is_ok());
    }

    #[test]
    fn test_password_violations_are_collected() {
        let errors = password_policy_violations("abc");
        assert!(errors.contains(&"Password must be at least 8 characters long"));
        assert!(errors.contains(&"Password must contain at least one uppercase letter"));
        assert!(errors.contains(&"Password must contain at least one digit"));
    }

    #[test]
    fn test_common_password_rejected() {
        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
    }
}
