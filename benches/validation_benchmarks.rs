use criterion::{Criterion, criterion_group, criterion_main};
use fieldcheck::*;
use std::hint::black_box;

fn bench_rule_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_parsing");

    let specs = vec![
        "required",
        "required|email|minlength[8]|between[8,10]",
        "required|regex[/^[A-Z]{2}[0-9]{4}$/i]|exactlength[6]",
    ];

    group.bench_function("parse_rules", |b| {
        b.iter(|| {
            for spec in &specs {
                parse_rules(black_box(spec)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_string_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_validators");

    let valid_emails = vec![
        "user@example.com",
        "test.user+tag@domain.co.uk",
        "admin@subdomain.example.com",
    ];

    group.bench_function("email", |b| {
        b.iter(|| {
            for email in &valid_emails {
                black_box(IsEmail::is_valid(black_box(email)));
            }
        })
    });

    group.bench_function("date", |b| {
        let validator = IsDate(DateFormat::MonthDayYear);
        b.iter(|| black_box(validator.is_valid(black_box("02/29/2012"))))
    });

    group.bench_function("min_length", |b| {
        let validator = MinLength(5);
        b.iter(|| black_box(validator.is_valid(black_box("Hello World 123"))))
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    let person = RuleSetDefinition::new()
        .with_rule("firstname", "First Name", "required|alpha|minlength[2]")
        .with_rule("lastname", "Last Name", "required|alpha")
        .with_rule("email", "Email", "required|email")
        .with_rule("dob", "Date of Birth", "required|date")
        .with_rule("zip", "Zip Code", "required|zipcode");

    let valid = json!({
        "firstname": "Josh",
        "lastname": "Moody",
        "email": "josh@example.com",
        "dob": "02/29/2012",
        "zip": "72201",
    });

    let invalid = json!({
        "firstname": "1",
        "email": "josh.example.com",
        "dob": "02/29/2014",
        "zip": "7220A",
    });

    group.bench_function("register_rule_set", |b| {
        b.iter(|| {
            let mut engine = Engine::new();
            engine.add_rule_set(black_box(&person)).unwrap();
            engine
        })
    });

    group.bench_function("validate_valid_record", |b| {
        let mut engine = Engine::new();
        engine.add_rule_set(&person).unwrap();
        b.iter(|| {
            engine.clear_errors();
            engine.validate_json(black_box(&valid)).unwrap()
        })
    });

    group.bench_function("validate_invalid_record", |b| {
        let mut engine = Engine::new();
        engine.add_rule_set(&person).unwrap();
        b.iter(|| {
            engine.clear_errors();
            engine.validate_json(black_box(&invalid)).unwrap();
            engine.error_summary_html()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rule_parsing,
    bench_string_validators,
    bench_engine
);
criterion_main!(benches);
