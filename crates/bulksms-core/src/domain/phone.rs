use crate::domain::country::CountryCode;
use crate::error::CoreError;

pub const MIN_CANONICAL_DIGITS: usize = 10;
pub const MAX_CANONICAL_DIGITS: usize = 15;

/// One local-format rewrite, tried in order within a numbering plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRule {
    /// `0` + mobile prefix (e.g. `07...`): drop the trunk digit, add the country code.
    TrunkMobilePrefix { trunk: char, mobile: char },
    /// Digits already carry the country code without `+`.
    BareCountryCode,
    /// Exactly the subscriber-number length: add the country code.
    SubscriberLength(usize),
    /// Trunk digit followed by a full subscriber number.
    TrunkSubscriber { trunk: char, subscriber_len: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct NumberingPlan {
    pub country_digits: &'static str,
    pub rules: &'static [LocalRule],
}

const UGANDA: NumberingPlan = NumberingPlan {
    country_digits: "256",
    rules: &[
        LocalRule::TrunkMobilePrefix {
            trunk: '0',
            mobile: '7',
        },
        LocalRule::BareCountryCode,
        LocalRule::SubscriberLength(9),
        LocalRule::TrunkSubscriber {
            trunk: '0',
            subscriber_len: 9,
        },
    ],
};

const NUMBERING_PLANS: &[NumberingPlan] = &[UGANDA];

pub fn numbering_plan(code: &CountryCode) -> Option<&'static NumberingPlan> {
    NUMBERING_PLANS
        .iter()
        .find(|plan| plan.country_digits == code.digits())
}

impl LocalRule {
    fn apply(self, digits: &str, country_digits: &str) -> Option<String> {
        match self {
            LocalRule::TrunkMobilePrefix { trunk, mobile } => {
                let mut chars = digits.chars();
                if chars.next() == Some(trunk) && chars.next() == Some(mobile) {
                    Some(format!("+{}{}", country_digits, &digits[1..]))
                } else {
                    None
                }
            }
            LocalRule::BareCountryCode => digits
                .starts_with(country_digits)
                .then(|| format!("+{digits}")),
            LocalRule::SubscriberLength(len) => {
                (digits.len() == len).then(|| format!("+{country_digits}{digits}"))
            }
            LocalRule::TrunkSubscriber {
                trunk,
                subscriber_len,
            } => (digits.len() == subscriber_len + 1 && digits.starts_with(trunk))
                .then(|| format!("+{}{}", country_digits, &digits[1..])),
        }
    }
}

/// Maps a user-supplied phone string to `+<digits>`.
///
/// Explicit international input (leading `+`) is trusted as-is. Otherwise the
/// country's numbering plan is consulted, falling back to prefixing the
/// calling code when the digits do not already start with it. The result must
/// carry 10 to 15 digits.
pub fn normalize_phone(raw: &str, default_country: &CountryCode) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(CoreError::InvalidPhoneFormat(raw.to_string()));
    }

    let canonical = if raw.trim_start().starts_with('+') {
        format!("+{digits}")
    } else {
        let country_digits = default_country.digits();
        let planned = numbering_plan(default_country).and_then(|plan| {
            plan.rules
                .iter()
                .find_map(|rule| rule.apply(&digits, country_digits))
        });
        match planned {
            Some(value) => value,
            None if digits.starts_with(country_digits) => format!("+{digits}"),
            None => format!("+{country_digits}{digits}"),
        }
    };

    if !validate_canonical_phone(&canonical) {
        return Err(CoreError::InvalidPhoneFormat(raw.to_string()));
    }
    Ok(canonical)
}

pub fn validate_canonical_phone(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };
    (MIN_CANONICAL_DIGITS..=MAX_CANONICAL_DIGITS).contains(&digits.len())
        && digits.chars().all(|ch| ch.is_ascii_digit())
}
