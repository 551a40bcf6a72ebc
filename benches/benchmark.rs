use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datebook::calendar::build_weeks;
use datebook::{Contact, ContactSearchIndex, Event, WeekStart};

fn generate_contacts(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|i| Contact {
            id: i.to_string(),
            name: format!("Contact Name {}", i),
            email: format!("contact{}@example.org", i),
            organization: format!("Organization {}", i % 10),
            role: format!("Role {}", i % 5),
            notes: String::new(),
        })
        .collect()
}

fn generate_events(count: usize) -> Vec<Event> {
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    (0..count)
        .map(|i| {
            Event::new(
                i.to_string(),
                format!("Event {}", i),
                start + Duration::days((i % 31) as i64),
            )
        })
        .collect()
}

// Matches any "Contact Name 50*" entry and its email
const QUERY: &str = "act 50";

fn naive_filter<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query.to_lowercase())
                || c.email.to_lowercase().contains(&query.to_lowercase())
                || c.organization.to_lowercase().contains(&query.to_lowercase())
        })
        .collect()
}

fn hoisted_filter<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let lowered = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&lowered)
                || c.email.to_lowercase().contains(&lowered)
                || c.organization.to_lowercase().contains(&lowered)
        })
        .collect()
}

fn contact_search_benchmarks(c: &mut Criterion) {
    let contacts = generate_contacts(10_000);

    c.bench_function("contact_filter_naive", |b| {
        b.iter(|| naive_filter(black_box(&contacts), black_box(QUERY)).len())
    });

    c.bench_function("contact_filter_hoisted_query", |b| {
        b.iter(|| hoisted_filter(black_box(&contacts), black_box(QUERY)).len())
    });

    let index = ContactSearchIndex::build(&contacts);
    c.bench_function("contact_filter_prebuilt_index", |b| {
        b.iter(|| index.filter(black_box(QUERY)).len())
    });

    c.bench_function("contact_index_build", |b| {
        b.iter(|| ContactSearchIndex::build(black_box(&contacts)).len())
    });
}

fn calendar_benchmarks(c: &mut Criterion) {
    let events = generate_events(500);
    let anchor = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    c.bench_function("build_month_weeks_500_events", |b| {
        b.iter(|| build_weeks(black_box(&events), black_box(anchor), WeekStart::Sunday).len())
    });
}

criterion_group!(benches, contact_search_benchmarks, calendar_benchmarks);
criterion_main!(benches);
