use super::{FieldCheck, ValidationReport};

/// Accented characters accepted in names, beyond ASCII letters
const NAME_EXTRA_CHARS: &str = "àáâäèéêëìíîïòóôöùúûüÀÁÂÄÈÉÊËÌÍÎÏÒÓÔÖÙÚÛÜñÑ";

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, '-' | '.' | '\'')
        || NAME_EXTRA_CHARS.contains(c)
}

/// Raw profile fields as staged by the edit form
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

pub fn validate_full_name(full_name: &str) -> FieldCheck {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("The full name is required");
    }
    let len = trimmed.chars().count();
    if len < 2 {
        FieldCheck::fail("The name must be at least 2 characters")
    } else if len > 100 {
        FieldCheck::fail("The name cannot exceed 100 characters")
    } else if !trimmed.chars().all(is_name_char) {
        FieldCheck::fail("The name contains invalid characters")
    } else {
        FieldCheck::ok()
    }
}

pub fn validate_phone(phone: &str) -> FieldCheck {
    let cleaned = phone.trim();
    if cleaned.is_empty() {
        return FieldCheck::fail("The phone number is required");
    }
    if !is_formatted_phone(cleaned) {
        FieldCheck::fail("Format: 7XXX-XXXX (e.g. 7123-4567)")
    } else {
        FieldCheck::ok()
    }
}

/// `7\d{3}-\d{4}`
fn is_formatted_phone(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 9
        && b[0] == b'7'
        && b[1..4].iter().all(|c| c.is_ascii_digit())
        && b[4] == b'-'
        && b[5..9].iter().all(|c| c.is_ascii_digit())
}

pub fn validate_address(address: &str) -> FieldCheck {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("The address is required");
    }
    let len = trimmed.chars().count();
    if len < 10 {
        FieldCheck::fail("The address must be at least 10 characters")
    } else if len > 200 {
        FieldCheck::fail("The address cannot exceed 200 characters")
    } else {
        FieldCheck::ok()
    }
}

/// Profile pictures accept a narrower set than product photos: no GIFs.
pub const ALLOWED_PICTURE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

pub fn validate_profile_picture(image: Option<&super::ImageFile>) -> FieldCheck {
    match image {
        // The stored picture is kept when nothing new is staged
        None => FieldCheck::ok(),
        Some(file) => {
            if !ALLOWED_PICTURE_TYPES.contains(&file.content_type.as_str()) {
                FieldCheck::fail("Only JPG, PNG or WEBP images are allowed")
            } else if file.size() > super::product::MAX_IMAGE_BYTES {
                FieldCheck::fail("The image cannot exceed 5MB")
            } else {
                FieldCheck::ok()
            }
        }
    }
}

/// Aggregate profile validation; keys match the edit form's field names.
pub fn validate_profile(input: &ProfileInput) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.record("fullName", validate_full_name(&input.full_name));
    report.record("phone", validate_phone(&input.phone));
    report.record("address", validate_address(&input.address));
    report
}

/// Per-keystroke phone transform: strip non-digits, prefix a `7` while the
/// number is still short enough to be mid-entry, insert the dash after the
/// fourth digit, and drop anything past eight digits. Because it runs on
/// every keystroke it re-processes its own previous output, so a pasted
/// value and the same value typed character by character can format
/// differently; that matches the shipped form's behavior.
pub fn format_phone_input(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if !digits.is_empty() && !digits.starts_with('7') && digits.len() <= 7 {
        digits.insert(0, '7');
    }

    if digits.len() > 4 {
        let tail_end = digits.len().min(8);
        format!("{}-{}", &digits[..4], &digits[4..tail_end])
    } else {
        digits
    }
}

/// Uppercase the first letter of each word, as the name field does while
/// the user types. Word characters follow the form's ASCII rules.
pub fn capitalize_words(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a value through the transform the way typing does: one
    /// character at a time, re-formatting the accumulated text.
    fn type_through(input: &str) -> String {
        let mut value = String::new();
        for c in input.chars() {
            value.push(c);
            value = format_phone_input(&value);
        }
        value
    }

    #[test]
    fn phone_format_inserts_dash() {
        assert_eq!(format_phone_input("71234567"), "7123-4567");
        assert_eq!(format_phone_input("7123"), "7123");
        assert_eq!(format_phone_input("71234"), "7123-4");
    }

    #[test]
    fn phone_format_idempotent_on_formatted_input() {
        assert_eq!(format_phone_input("7123-4567"), "7123-4567");
    }

    #[test]
    fn phone_format_prefixes_short_non_seven_input() {
        assert_eq!(format_phone_input("1234567"), "7123-4567");
        // Eight digits skip the prefix rule entirely
        assert_eq!(format_phone_input("81234567"), "8123-4567");
    }

    #[test]
    fn phone_typed_digit_by_digit_accumulates_the_prefix() {
        // The shipped form formats on every keystroke, so a leading 8 gets
        // a 7 prepended on the first keypress and the final digit is
        // truncated past eight digits.
        assert_eq!(type_through("81234567"), "7812-3456");
        assert_eq!(type_through("71234567"), "7123-4567");
    }

    #[test]
    fn phone_format_strips_noise() {
        assert_eq!(format_phone_input("(7123) 45-67"), "7123-4567");
        assert_eq!(format_phone_input(""), "");
    }

    #[test]
    fn phone_validation_requires_exact_shape() {
        assert!(validate_phone("7123-4567").is_valid);
        for bad in ["", "71234567", "8123-4567", "7123-456", "7123-45678", "abcd-efgh"] {
            assert!(!validate_phone(bad).is_valid, "phone {:?} should fail", bad);
        }
    }

    #[test]
    fn full_name_accepts_latin_diacritics() {
        assert!(validate_full_name("María José O'Neill-Pérez Jr.").is_valid);
        assert!(!validate_full_name("Robert; DROP TABLE").is_valid);
        assert!(!validate_full_name("A").is_valid);
        assert!(!validate_full_name("").is_valid);
    }

    #[test]
    fn address_length_bounds() {
        assert!(!validate_address("short").is_valid);
        assert!(validate_address("Colonia Escalón, #42").is_valid);
        assert!(!validate_address(&"x".repeat(201)).is_valid);
    }

    #[test]
    fn aggregate_uses_form_field_keys() {
        let report = validate_profile(&ProfileInput::default());
        assert!(!report.is_valid());
        assert!(report.errors.contains_key("fullName"));
        assert!(report.errors.contains_key("phone"));
        assert!(report.errors.contains_key("address"));
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("miguel torres"), "Miguel Torres");
        assert_eq!(capitalize_words("o'neill"), "O'Neill");
        assert_eq!(capitalize_words(""), "");
    }
}
