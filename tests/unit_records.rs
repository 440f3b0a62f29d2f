// Unit tests for the record generator, JSONL codec, and validation.
//
// Generator output is checked field by field against the documented
// domains. File tests write to a temp directory.

use pizza_guard::batch::validate_lines;
use pizza_guard::records::generator::{
    RecordGenerator, EMAIL_DOMAINS, FEEDBACK_TEMPLATES, FIRST_NAMES, LAST_NAMES, PIZZA_TYPES,
};
use pizza_guard::records::jsonl::{parse_records, read_records, write_records};
use pizza_guard::records::validate::{validate_record, ValidationIssue};
use pizza_guard::records::FeedbackRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(count: usize) -> Vec<FeedbackRecord> {
    RecordGenerator::new(StdRng::seed_from_u64(2024)).generate(count)
}

// ============================================================
// Generator — shape and field domains
// ============================================================

#[test]
fn generates_requested_count_with_padded_ids() {
    let records = seeded(12);
    assert_eq!(records.len(), 12);
    assert_eq!(records[0].record_id, "001");
    assert_eq!(records[9].record_id, "010");
    assert_eq!(records[11].record_id, "012");
}

#[test]
fn ids_past_999_keep_growing() {
    let mut generator = RecordGenerator::new(StdRng::seed_from_u64(9));
    assert_eq!(generator.record(1000).record_id, "1000");
}

#[test]
fn model_input_uses_fixed_sampling_settings() {
    for record in seeded(10) {
        assert_eq!(record.model_input.max_tokens_to_sample, 300);
        assert_eq!(record.model_input.temperature, 0.7);
        assert!(record.model_input.prompt.starts_with("\n\nHuman: "));
        assert!(record
            .model_input
            .prompt
            .ends_with("\n\nAssistant: I'll help analyze this customer's pizza feedback."));
    }
}

#[test]
fn prompt_mentions_feedback_pizza_and_rating() {
    for record in seeded(10) {
        let m = &record.metadata;
        let prompt = &record.model_input.prompt;
        assert!(prompt.contains(&format!("Customer says: {}.", m.feedback)));
        assert!(prompt.contains(&format!("Pizza type: {}.", m.pizza_type)));
        assert!(prompt.contains(&format!("Rating: {:.1}\n", m.rating)));
    }
}

#[test]
fn metadata_fields_stay_in_their_domains() {
    for record in seeded(200) {
        let m = &record.metadata;

        let digits = m.customer_id.strip_prefix('C').expect("customer id starts with C");
        let n: u32 = digits.parse().unwrap();
        assert!((100..=999).contains(&n), "customer id {}", m.customer_id);

        assert!(FEEDBACK_TEMPLATES.contains(&m.feedback.as_str()));
        assert!(PIZZA_TYPES.contains(&m.pizza_type.as_str()));

        assert!((1.0..=5.0).contains(&m.rating), "rating {}", m.rating);
        assert_eq!((m.rating * 10.0).round() / 10.0, m.rating);

        let (first, last) = m.contact.name.split_once(' ').unwrap();
        assert!(FIRST_NAMES.contains(&first));
        assert!(LAST_NAMES.contains(&last));

        let (_, domain) = m.contact.email.split_once('@').unwrap();
        assert!(EMAIL_DOMAINS.contains(&domain));
    }
}

#[test]
fn phone_segments_stay_in_range() {
    for record in seeded(200) {
        let phone = &record.metadata.contact.phone;
        let parts: Vec<&str> = phone.split('-').collect();
        assert_eq!(parts.len(), 4, "phone {phone}");
        assert_eq!(parts[0], "+1");
        let area: u32 = parts[1].parse().unwrap();
        let exchange: u32 = parts[2].parse().unwrap();
        let line: u32 = parts[3].parse().unwrap();
        assert!((200..=999).contains(&area));
        assert!((100..=999).contains(&exchange));
        assert!((1000..=9999).contains(&line));
    }
}

#[test]
fn generated_records_pass_validation() {
    for record in seeded(50) {
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(validate_record(&value), Vec::<ValidationIssue>::new());
    }
}

// ============================================================
// JSONL — file round trip and line-level error handling
// ============================================================

#[test]
fn write_then_read_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.jsonl");
    let records = seeded(10);

    write_records(&path, &records).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 10);
    assert!(text.ends_with('\n'));
    assert!(text.lines().all(|l| l.starts_with("{\"recordId\":")));

    let read: Vec<FeedbackRecord> = read_records(&path)
        .unwrap()
        .into_iter()
        .map(|p| p.result.unwrap())
        .collect();
    assert_eq!(read, records);
}

#[test]
fn writing_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.jsonl");

    write_records(&path, &seeded(5)).unwrap();
    write_records(&path, &seeded(2)).unwrap();

    assert_eq!(read_records(&path).unwrap().len(), 2);
}

#[test]
fn malformed_lines_do_not_stop_parsing() {
    let good = serde_json::to_string(&seeded(1)[0]).unwrap();
    let text = format!("{good}\n{{not json\n\n{good}\n{{\"recordId\": \"002\"}}\n");

    let parsed = parse_records(&text);
    assert_eq!(parsed.len(), 4, "blank line is skipped");

    assert!(parsed[0].result.is_ok());
    assert_eq!(parsed[1].line_number, 2);
    assert!(parsed[1].result.is_err());
    assert_eq!(parsed[2].line_number, 4);
    assert!(parsed[2].result.is_ok());
    // Valid JSON but missing fields
    assert_eq!(parsed[3].line_number, 5);
    assert!(parsed[3].result.is_err());
}

#[test]
fn reads_records_in_the_original_wire_format() {
    let line = r#"{"recordId": "001", "modelInput": {"prompt": "\n\nHuman: hi", "max_tokens_to_sample": 300, "temperature": 0.7}, "metadata": {"customer_id": "C512", "feedback": "Arrived cold", "pizza_type": "Meat Lover's", "rating": 3.4, "contact": {"name": "Noah Davis", "email": "noah.davis77@yahoo.com", "phone": "+1-646-201-9981"}}}"#;

    let parsed = parse_records(line);
    let record = parsed[0].result.as_ref().unwrap();
    assert_eq!(record.record_id, "001");
    assert_eq!(record.metadata.pizza_type, "Meat Lover's");
    assert_eq!(record.metadata.rating, 3.4);
    assert_eq!(record.metadata.contact.email, "noah.davis77@yahoo.com");
}

#[test]
fn read_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_records(dir.path().join("absent.jsonl")).is_err());
}

// ============================================================
// Validate batch
// ============================================================

#[test]
fn validate_counts_bad_lines_and_keeps_going() {
    let records = seeded(2);
    let mut bad_contact = serde_json::to_value(&records[1]).unwrap();
    bad_contact["metadata"]["contact"]["email"] = "not-an-email".into();

    let text = format!(
        "{}\nnot json at all\n\n{}\n{}\n",
        serde_json::to_string(&records[0]).unwrap(),
        bad_contact,
        serde_json::to_string(&records[1]).unwrap()
    );

    let tally = validate_lines(&text);
    assert_eq!(tally.checked, 4);
    assert_eq!(tally.invalid, 2);
    assert!(!tally.is_clean());
}

#[test]
fn generated_batch_validates_clean() {
    let text: String = seeded(5)
        .iter()
        .map(|r| serde_json::to_string(r).unwrap() + "\n")
        .collect();

    let tally = validate_lines(&text);
    assert_eq!(tally.checked, 5);
    assert!(tally.is_clean());
}
