// Synthetic feedback record generator.
//
// Produces plausible-looking pizza feedback with fake contact details so the
// guardrail has PII to chew on. The RNG is injected so tests can seed it.

use rand::Rng;

use super::{Contact, FeedbackRecord, Metadata, ModelInput};

pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

pub const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "example.com",
    "pizza.com",
];

pub const FEEDBACK_TEMPLATES: &[&str] = &[
    "Too salty for my taste",
    "Delicious pizza!",
    "Could use more toppings",
    "Crust was perfect",
    "Arrived cold",
    "Best pizza in town",
    "Spicy but good",
    "Needs more cheese",
    "Great flavor combination",
    "Disappointed with the quality",
];

pub const PIZZA_TYPES: &[&str] = &[
    "Supreme",
    "Margherita",
    "Pepperoni",
    "Vegetarian",
    "Hawaiian",
    "Meat Lover's",
    "BBQ Chicken",
    "Four Cheese",
    "Mushroom",
    "Veggie Deluxe",
];

/// Generates feedback records from a caller-supplied random source.
pub struct RecordGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` records with ids "001" through the zero-padded `count`.
    pub fn generate(&mut self, count: usize) -> Vec<FeedbackRecord> {
        self.generate_with(count, |_| {})
    }

    /// Like `generate`, calling `on_record` after each record is built.
    pub fn generate_with(
        &mut self,
        count: usize,
        mut on_record: impl FnMut(&FeedbackRecord),
    ) -> Vec<FeedbackRecord> {
        (1..=count)
            .map(|i| {
                let record = self.record(i);
                on_record(&record);
                record
            })
            .collect()
    }

    /// Generate the record with the given 1-based sequence number.
    pub fn record(&mut self, index: usize) -> FeedbackRecord {
        let name = self.name();
        let customer_id = self.customer_id();
        let feedback = self.pick(FEEDBACK_TEMPLATES).to_string();
        let pizza_type = self.pick(PIZZA_TYPES).to_string();
        let rating = self.rating();
        let email = self.email(&name);
        let phone = self.phone();

        FeedbackRecord {
            record_id: format!("{index:03}"),
            model_input: ModelInput {
                prompt: build_prompt(&feedback, &pizza_type, rating),
                max_tokens_to_sample: DEFAULT_MAX_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            },
            metadata: Metadata {
                customer_id,
                feedback,
                pizza_type,
                rating,
                contact: Contact { name, email, phone },
            },
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.random_range(0..items.len())]
    }

    fn customer_id(&mut self) -> String {
        format!("C{}", self.rng.random_range(100..=999))
    }

    fn name(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        format!("{first} {last}")
    }

    fn email(&mut self, name: &str) -> String {
        let username = name.to_lowercase().replace(' ', ".");
        let suffix = self.rng.random_range(1..=999);
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{username}{suffix}@{domain}")
    }

    fn phone(&mut self) -> String {
        format!(
            "+1-{}-{}-{}",
            self.rng.random_range(200..=999),
            self.rng.random_range(100..=999),
            self.rng.random_range(1000..=9999)
        )
    }

    /// Uniform in [1.0, 5.0], rounded to one decimal place.
    fn rating(&mut self) -> f64 {
        let raw: f64 = self.rng.random_range(1.0..=5.0);
        (raw * 10.0).round() / 10.0
    }
}

/// Build the Human/Assistant framed prompt for a piece of feedback.
pub fn build_prompt(feedback: &str, pizza_type: &str, rating: f64) -> String {
    format!(
        "\n\nHuman: Analyze customer feedback for pizza order. \
         Customer says: {feedback}. \
         Pizza type: {pizza_type}. \
         Rating: {rating:.1}\
         \n\nAssistant: I'll help analyze this customer's pizza feedback."
    )
}
