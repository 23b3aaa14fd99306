use crate::models::Brand;
use crate::services::ai::intent::service_topic;

/// Canned answer for a services question, picked by the domain it mentions.
pub fn answer<'a>(brand: &'a Brand, text: &str) -> &'a str {
    brand.faq.for_topic(service_topic(text))
}
