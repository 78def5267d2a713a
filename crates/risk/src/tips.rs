//! User-facing security tips shown alongside risk warnings

const SECURITY_TIPS: [&str; 8] = [
    "Always double-check recipient addresses before sending funds.",
    "Never share your private keys or seed phrases with anyone.",
    "Be cautious of unexpected requests for cryptocurrency transfers.",
    "Enable two-factor authentication where available.",
    "Regularly update your passwords and security settings.",
    "Consider using a hardware wallet for large amounts.",
    "Monitor your transaction history regularly for unauthorized activity.",
    "Be wary of offers that seem too good to be true - they usually are.",
];

/// Fixed, ordered list of security tips
pub fn security_tips() -> &'static [&'static str] {
    &SECURITY_TIPS
}
