//! Tests for request payload validation.

use super::*;
use rstest::{fixture, rstest};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[fixture]
fn today() -> NaiveDate {
    date(2026, 3, 2)
}

#[fixture]
fn create() -> CreateEmployeeDto {
    CreateEmployeeDto {
        first_name: "Kishore".to_owned(),
        last_name: "Kumar".to_owned(),
        email: "kishore.kumar@company.com".to_owned(),
        phone_number: Some("+91-9876543211".to_owned()),
        department: "Marketing".to_owned(),
        position: "Marketing Manager".to_owned(),
        salary: Decimal::new(75_000, 0),
        hire_date: date(2021, 8, 20),
    }
}

fn fields(violations: &[Violation]) -> Vec<&'static str> {
    violations.iter().map(|violation| violation.field).collect()
}

#[rstest]
fn valid_payload_passes(create: CreateEmployeeDto, today: NaiveDate) {
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
#[case("engineering")]
#[case("CUSTOMER SERVICE")]
#[case("It")]
fn departments_match_case_insensitively(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] department: &str,
) {
    create.department = department.to_owned();
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
fn unknown_department_is_rejected(mut create: CreateEmployeeDto, today: NaiveDate) {
    create.department = "Research".to_owned();
    let violations = validate_create(&create, today);
    assert_eq!(
        violations,
        vec![Violation::new("Department", "Please select a valid department")]
    );
}

#[rstest]
#[case("Kishore2")]
#[case("O'Brien")]
fn names_allow_only_letters_and_spaces(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] first_name: &str,
) {
    create.first_name = first_name.to_owned();
    let violations = validate_create(&create, today);
    assert_eq!(fields(&violations), vec!["FirstName"]);
    assert_eq!(
        violations[0].message,
        "First name can only contain letters and spaces"
    );
}

#[rstest]
fn blank_name_reports_required_once(mut create: CreateEmployeeDto, today: NaiveDate) {
    create.last_name = "  ".to_owned();
    let violations = validate_create(&create, today);
    assert_eq!(
        violations,
        vec![Violation::new("LastName", "Last name is required")]
    );
}

#[rstest]
fn overlong_name_is_rejected(mut create: CreateEmployeeDto, today: NaiveDate) {
    create.first_name = "a".repeat(101);
    let violations = validate_create(&create, today);
    assert_eq!(fields(&violations), vec!["FirstName"]);
}

#[rstest]
#[case("not-an-email")]
#[case("two@@company.com")]
#[case("trailing@")]
#[case("@company.com")]
#[case("spaced out@company.com")]
fn malformed_email_is_rejected(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] email: &str,
) {
    create.email = email.to_owned();
    let violations = validate_create(&create, today);
    assert_eq!(
        violations,
        vec![Violation::new("Email", "Please provide a valid email address")]
    );
}

#[rstest]
#[case("user@host")]
#[case("First.Last@Company.COM")]
fn email_host_needs_no_dot(mut create: CreateEmployeeDto, today: NaiveDate, #[case] email: &str) {
    create.email = email.to_owned();
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
fn every_pattern_compiles() {
    for pattern in [&NAME_PATTERN, &EMAIL_PATTERN, &PHONE_PATTERN] {
        assert!(pattern.regex().is_some(), "pattern {}", pattern.source);
    }
}

#[rstest]
#[case(Some("phone: 123"))]
#[case(Some("+1 (555) 123-4567-8901234"))]
fn malformed_phone_is_rejected(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] phone: Option<&str>,
) {
    create.phone_number = phone.map(str::to_owned);
    let violations = validate_create(&create, today);
    assert_eq!(fields(&violations), vec!["PhoneNumber"]);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("+1 (555) 123-4567"))]
fn optional_phone_accepts_absent_or_well_formed(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] phone: Option<&str>,
) {
    create.phone_number = phone.map(str::to_owned);
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
#[case(Decimal::ZERO, "Salary must be greater than 0")]
#[case(Decimal::new(-5, 0), "Salary must be greater than 0")]
#[case(Decimal::new(10_000_000, 0), "Salary seems unrealistic")]
fn salary_outside_range_is_rejected(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] salary: Decimal,
    #[case] message: &str,
) {
    create.salary = salary;
    assert_eq!(
        validate_create(&create, today),
        vec![Violation::new("Salary", message)]
    );
}

#[rstest]
fn salary_just_below_ceiling_passes(mut create: CreateEmployeeDto, today: NaiveDate) {
    create.salary = Decimal::new(999_999_999, 2);
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
#[case(date(2026, 3, 3), "Hire date cannot be in the future")]
#[case(date(1900, 1, 1), "Hire date must be after 1900")]
fn hire_date_outside_window_is_rejected(
    mut create: CreateEmployeeDto,
    today: NaiveDate,
    #[case] hire_date: NaiveDate,
    #[case] message: &str,
) {
    create.hire_date = hire_date;
    assert_eq!(
        validate_create(&create, today),
        vec![Violation::new("HireDate", message)]
    );
}

#[rstest]
fn hire_date_today_passes(mut create: CreateEmployeeDto, today: NaiveDate) {
    create.hire_date = today;
    assert!(validate_create(&create, today).is_empty());
}

#[rstest]
fn every_failed_rule_is_reported(today: NaiveDate) {
    let dto = CreateEmployeeDto {
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        phone_number: None,
        department: String::new(),
        position: String::new(),
        salary: Decimal::ZERO,
        hire_date: today,
    };
    assert_eq!(
        fields(&validate_create(&dto, today)),
        vec![
            "FirstName",
            "LastName",
            "Email",
            "Department",
            "Position",
            "Salary"
        ]
    );
}

#[rstest]
fn update_payload_follows_create_rules(create: CreateEmployeeDto, today: NaiveDate) {
    let dto = UpdateEmployeeDto {
        first_name: create.first_name,
        last_name: create.last_name,
        email: "broken".to_owned(),
        phone_number: create.phone_number,
        department: create.department,
        position: create.position,
        salary: create.salary,
        hire_date: create.hire_date,
        is_active: false,
    };
    assert_eq!(fields(&validate_update(&dto, today)), vec!["Email"]);
}

#[rstest]
fn promotion_checks_position_and_salary() {
    let dto = PromoteEmployeeDto {
        position: String::new(),
        salary: Decimal::ZERO,
    };
    assert_eq!(fields(&validate_promotion(&dto)), vec!["Position", "Salary"]);
}

#[rstest]
fn transfer_requires_known_department() {
    let valid = TransferEmployeeDto {
        department: "legal".to_owned(),
    };
    let invalid = TransferEmployeeDto {
        department: "Space".to_owned(),
    };
    assert!(validate_transfer(&valid).is_empty());
    assert_eq!(fields(&validate_transfer(&invalid)), vec!["Department"]);
}

#[rstest]
fn contact_requires_email() {
    let dto = UpdateContactDto {
        phone_number: Some("12345".to_owned()),
        email: String::new(),
    };
    assert_eq!(
        validate_contact(&dto),
        vec![Violation::new("Email", "Email is required")]
    );
}

#[rstest]
fn salary_update_uses_salary_range() {
    let dto = UpdateSalaryDto {
        salary: Decimal::new(12_000_000, 0),
    };
    assert_eq!(fields(&validate_salary(&dto)), vec!["Salary"]);
}
