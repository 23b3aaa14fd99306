use super::booking::EventType;
use super::intent::ServiceTopic;

/// Copy and booking defaults for one deployment of the assistant. The state
/// machine is shared; only this table differs between brands.
#[derive(Debug, Clone)]
pub struct Brand {
    pub key: String,
    pub name: String,
    pub welcome: String,
    pub persona: String,
    pub event_type: EventType,
    pub meeting_title: String,
    pub working_hours: String,
    pub schedule_offer: String,
    pub decline: String,
    pub faq: FaqCopy,
}

#[derive(Debug, Clone)]
pub struct FaqCopy {
    pub healthtech: String,
    pub femtech: String,
    pub agetech: String,
    pub general: String,
}

impl FaqCopy {
    pub fn for_topic(&self, topic: ServiceTopic) -> &str {
        match topic {
            ServiceTopic::HealthTech => &self.healthtech,
            ServiceTopic::FemTech => &self.femtech,
            ServiceTopic::AgeTech => &self.agetech,
            ServiceTopic::General => &self.general,
        }
    }
}

const EVENT_TYPE_ID: u64 = 1854515;

const SCHEDULE_OFFER: &str = "Great! Let's schedule your meeting.

Here's what to do:
- Provide your name, email, date, and time.
- Choose whether to meet in person, online, or via phone.
- Add any extra details you'd like us to know.

Once submitted:
- We'll book your appointment and send a confirmation email.
- If there's an issue, we'll follow up with alternatives.

Do you want to schedule an appointment?";

const DECLINE: &str = "Alright! Let us know if there's anything else we can assist you with.";

const WORKING_HOURS: &str = "Our working hours are from 9:00 AM to 5:00 PM every day.";

fn shared_faq() -> FaqCopy {
    FaqCopy {
        healthtech: "In HealthTech, we deliver personalized AI models for patient care, operational efficiency, and predictive analytics. Examples include medical chatbots, appointment automation, and clinical decision support systems. How can we assist you in HealthTech?".to_string(),
        femtech: "In FemTech, we provide AI solutions like menstrual tracking, fertility optimization tools, and personalized wellness recommendations. Would you like to explore any of these areas further?".to_string(),
        agetech: "In AgeTech and Longevity, our AI solutions support healthy aging through predictive analytics, smart healthcare monitoring, and cognitive health enhancement tools. Let us know your interest!".to_string(),
        general: "We offer a wide range of AI-powered solutions across HealthTech, FemTech, AgeTech, and Longevity. Would you like to:
1. Explore automation for your business?
2. Learn about multilingual conversational AI?
3. Discuss personalized AI strategies?
Let us know your focus area.".to_string(),
    }
}

impl Brand {
    pub fn engage_ai() -> Self {
        Self {
            key: "engageai".to_string(),
            name: "EngageAI".to_string(),
            welcome: "Welcome to EngageAI!

EngageAI specializes in crafting innovative AI-powered solutions tailored for HealthTech, AgeTech, FemTech, and Longevity industries. We excel in:

- AI-Driven Bots: Intelligent automation to streamline operations.
- Multilingual Conversational AI: Breaking language barriers for global reach.
- Personalized AI Strategies: Accelerating market entry and enhancing operational efficiency.

How can we assist you today? Whether you're exploring AI adoption or looking for bespoke AI strategies, we're here to guide you.".to_string(),
            persona: String::new(),
            event_type: EventType {
                id: EVENT_TYPE_ID,
                title: "EngageAI".to_string(),
            },
            meeting_title: "Meeting".to_string(),
            working_hours: WORKING_HOURS.to_string(),
            schedule_offer: SCHEDULE_OFFER.to_string(),
            decline: DECLINE.to_string(),
            faq: shared_faq(),
        }
    }

    pub fn aicognitech() -> Self {
        Self {
            key: "aicognitech".to_string(),
            name: "AiCogniTech".to_string(),
            welcome: "Welcome to AiCogniTech!

We are revolutionizing health and wellness through cutting-edge AI innovations in FemTech, AgeTech, HealthTech, and Longevity. By addressing unique challenges in each sector, we deliver strategic solutions that redefine personalized care and well-being, shaping healthier, more fulfilling futures for all.

How can we assist you today?".to_string(),
            persona: String::new(),
            event_type: EventType {
                id: EVENT_TYPE_ID,
                title: "AiCogniTech".to_string(),
            },
            meeting_title: "AiCogniTech Consultation".to_string(),
            working_hours: WORKING_HOURS.to_string(),
            schedule_offer: SCHEDULE_OFFER.to_string(),
            decline: DECLINE.to_string(),
            faq: shared_faq(),
        }
    }

    pub fn builtin(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "engageai" => Some(Self::engage_ai()),
            "aicognitech" => Some(Self::aicognitech()),
            _ => None,
        }
    }

    /// Shown when the booking form opens.
    pub fn form_prompt(&self) -> String {
        format!(
            "Please fill in the booking form: name, email, preferred date (YYYY-MM-DD) and time (HH:MM), \
             plus optionally your timezone, GMT offset, location (inPerson, online or phone), \
             a meeting title and any additional details.\n\n{}",
            self.working_hours
        )
    }
}
