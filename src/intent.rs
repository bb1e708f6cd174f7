//! Free-text intent routing.
//!
//! Input is case-folded and checked against an ordered rule table. A rule
//! matches when any of its keywords occurs as a substring ("booking" matches
//! "book"). The first matching rule wins, so table order decides overlaps:
//! "book medicine" resolves to whichever of the two rules is listed first.
//! Nothing matching means the fallback.

use serde::Serialize;

use crate::render::Section;

/// One (keywords → action) row.
#[derive(Debug, Clone)]
pub struct IntentRule<A> {
    pub keywords: &'static [&'static str],
    pub action: A,
}

impl<A> IntentRule<A> {
    pub const fn new(keywords: &'static [&'static str], action: A) -> Self {
        Self { keywords, action }
    }

    /// Whether any keyword occurs in already case-folded text.
    fn matches(&self, folded: &str) -> bool {
        self.keywords.iter().any(|k| folded.contains(k))
    }
}

/// Ordered rule table with a fallback.
#[derive(Debug, Clone)]
pub struct IntentRouter<A> {
    rules: Vec<IntentRule<A>>,
    fallback: A,
}

impl<A> IntentRouter<A> {
    pub fn new(rules: Vec<IntentRule<A>>, fallback: A) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[IntentRule<A>] {
        &self.rules
    }

    /// Position of the first rule matching `text`, if any.
    pub fn matching_rule(&self, text: &str) -> Option<usize> {
        let folded = text.to_lowercase();
        self.rules.iter().position(|rule| rule.matches(&folded))
    }

    /// Action for `text`: the first matching rule's, else the fallback.
    pub fn route(&self, text: &str) -> &A {
        match self.matching_rule(text) {
            Some(i) => &self.rules[i].action,
            None => &self.fallback,
        }
    }
}

// ═══════════════════════════════════════════
// Voice command table
// ═══════════════════════════════════════════

/// What a spoken command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VoiceAction {
    Navigate { section: Section },
    OpenChat,
    /// Speak how many appointments are stored.
    ReadAppointments,
    /// Speak `VOICE_FALLBACK`.
    NotUnderstood,
}

pub const VOICE_FALLBACK: &str = "Sorry, I did not catch that.";

pub fn voice_router() -> IntentRouter<VoiceAction> {
    IntentRouter::new(
        vec![
            IntentRule::new(&["book"], VoiceAction::Navigate { section: Section::Appointment }),
            IntentRule::new(&["chat"], VoiceAction::OpenChat),
            IntentRule::new(&["hospital"], VoiceAction::Navigate { section: Section::Hospitals }),
            IntentRule::new(&["symptom"], VoiceAction::Navigate { section: Section::Symptoms }),
            IntentRule::new(&["read my appointments"], VoiceAction::ReadAppointments),
        ],
        VoiceAction::NotUnderstood,
    )
}

/// Spoken answer to "read my appointments".
pub fn appointment_count_phrase(count: usize) -> String {
    if count == 0 {
        "You have no appointments yet.".to_string()
    } else {
        format!("You have {count} appointments saved.")
    }
}

// ═══════════════════════════════════════════
// Chatbot reply table
// ═══════════════════════════════════════════

pub const CHAT_GREETING: &str = "Hi! I am HealCare Assistant. How can I help you today?";

pub const CHAT_FALLBACK: &str = "I can help with booking, medicine delivery, nearby hospitals, veterinary care, and symptom guidance. What would you like to do?";

pub fn chat_router() -> IntentRouter<&'static str> {
    IntentRouter::new(
        vec![
            IntentRule::new(
                &["timing", "open"],
                "HealCare is available 24/7 online. Clinic visits depend on doctor schedule after booking.",
            ),
            IntentRule::new(
                &["book"],
                "To book, go to the Appointments section, select a department and doctor, then choose date and time.",
            ),
            IntentRule::new(
                &["price", "cost", "fee"],
                "Online consultation fees typically range from $10–$30 in this demo.",
            ),
            IntentRule::new(
                &["medicine"],
                "Use the Medicine Delivery section to add items to your cart and checkout (demo).",
            ),
            IntentRule::new(
                &["vet", "pet"],
                "We have veterinary doctors available. See the Vet Doctors list in Medicine Delivery section.",
            ),
            IntentRule::new(
                &["emergency"],
                "If this is an emergency, call your local emergency number immediately.",
            ),
            IntentRule::new(
                &["symptom", "sick", "pain"],
                "Try the Symptom Checker for quick advice, or book an appointment for a professional evaluation.",
            ),
        ],
        CHAT_FALLBACK,
    )
}

/// Reply for one chat message. Pure over the reply table.
pub fn chat_reply(text: &str) -> &'static str {
    *chat_router().route(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_phrase_routes_to_booking() {
        let router = voice_router();
        assert_eq!(
            router.route("please book an appointment"),
            &VoiceAction::Navigate { section: Section::Appointment }
        );
    }

    #[test]
    fn unknown_text_falls_back_in_both_tables() {
        assert_eq!(voice_router().route("no idea"), &VoiceAction::NotUnderstood);
        assert_eq!(chat_reply("no idea"), CHAT_FALLBACK);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let router = voice_router();
        assert_eq!(
            router.route("BOOKING please"),
            &VoiceAction::Navigate { section: Section::Appointment }
        );
        assert_eq!(
            router.route("nearest Hospitals"),
            &VoiceAction::Navigate { section: Section::Hospitals }
        );
    }

    #[test]
    fn first_listed_rule_wins_on_overlap() {
        // "book" precedes "medicine" in the chat table
        let reply = chat_reply("can I book medicine delivery");
        assert!(reply.starts_with("To book"));

        // "chat" precedes "hospital" in the voice table
        assert_eq!(voice_router().route("chat about hospital"), &VoiceAction::OpenChat);
    }

    #[test]
    fn read_my_appointments_phrase() {
        let router = voice_router();
        assert_eq!(router.route("read my appointments"), &VoiceAction::ReadAppointments);
        assert_eq!(router.matching_rule("read my appointments"), Some(4));
    }

    #[test]
    fn timing_rule_catches_open_inside_words() {
        // "open" is a substring match, so "reopen" hits the timing reply
        assert!(chat_reply("when do you reopen?").starts_with("HealCare is available"));
    }

    #[test]
    fn chat_rules_cover_each_row() {
        let cases = [
            ("what are your timings", "HealCare is available"),
            ("how much is the fee", "Online consultation fees"),
            ("need medicine", "Use the Medicine Delivery"),
            ("my pet is ill", "We have veterinary"),
            ("EMERGENCY!", "If this is an emergency"),
            ("I am sick", "Try the Symptom Checker"),
        ];
        for (input, prefix) in cases {
            assert!(chat_reply(input).starts_with(prefix), "{input} -> {}", chat_reply(input));
        }
    }

    #[test]
    fn chat_reply_is_deterministic() {
        for input in ["book", "price?", "random words", ""] {
            assert_eq!(chat_reply(input), chat_reply(input));
        }
    }

    #[test]
    fn appointment_count_phrases() {
        assert_eq!(appointment_count_phrase(0), "You have no appointments yet.");
        assert_eq!(appointment_count_phrase(3), "You have 3 appointments saved.");
    }

    #[test]
    fn empty_table_always_falls_back() {
        let router: IntentRouter<u8> = IntentRouter::new(vec![], 7);
        assert_eq!(router.route("anything"), &7);
        assert!(router.rules().is_empty());
    }
}
