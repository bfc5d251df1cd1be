//! Handler tests against mocked employee ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockEmployeesCommand, MockEmployeesQuery};
use crate::inbound::http::error::INTERNAL_ERROR_MESSAGE;
use crate::test_support::clock::MutableClock;
use crate::test_support::fixtures::create_request;

fn sample_dto(id: i32) -> EmployeeDto {
    let created = Utc
        .with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    EmployeeDto {
        id,
        first_name: "Bill".into(),
        last_name: "Kishore".into(),
        full_name: "Bill Kishore".into(),
        email: "bill.kishore@company.com".into(),
        phone_number: Some("+91-9876543210".into()),
        department: "Engineering".into(),
        position: "Senior Software Engineer".into(),
        salary: Decimal::new(95_000, 0),
        hire_date: NaiveDate::from_ymd_opt(2022, 3, 15).expect("valid date"),
        is_active: true,
        created_at: created,
        updated_at: None,
    }
}

fn test_app(
    query: MockEmployeesQuery,
    command: MockEmployeesCommand,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let now = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let clock: Arc<dyn Clock> = Arc::new(MutableClock::new(now));
    let state = HttpState::new(Arc::new(query), Arc::new(command), clock);
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(configure))
}

async fn send(
    query: MockEmployeesQuery,
    command: MockEmployeesCommand,
    request: actix_test::TestRequest,
) -> (StatusCode, actix_web::http::header::HeaderMap, Value) {
    let app = actix_test::init_service(test_app(query, command)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, headers, value)
}

fn message(body: &Value) -> Option<&str> {
    body.get("Message").and_then(Value::as_str)
}

#[rstest]
#[case("/api/employees/0")]
#[case("/api/employees/-3")]
#[case("/api/employees/abc")]
#[actix_web::test]
async fn invalid_ids_are_rejected_before_reaching_ports(#[case] uri: &str) {
    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some("Invalid employee ID"));
    assert_eq!(
        body.get("Code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[rstest]
#[actix_web::test]
async fn get_returns_the_employee() {
    let mut query = MockEmployeesQuery::new();
    query
        .expect_get_by_id()
        .withf(|id| id.get() == 1)
        .times(1)
        .return_once(|_| Ok(Some(sample_dto(1))));

    let (status, _, body) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees/1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("FullName"), Some(&json!("Bill Kishore")));
    assert_eq!(body.get("Salary"), Some(&json!("95000")));
}

#[rstest]
#[actix_web::test]
async fn get_missing_employee_is_404() {
    let mut query = MockEmployeesQuery::new();
    query.expect_get_by_id().return_once(|_| Ok(None));

    let (status, _, body) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees/99"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some("Employee with ID 99 not found"));
}

#[rstest]
#[actix_web::test]
async fn active_segment_is_not_parsed_as_an_id() {
    let mut query = MockEmployeesQuery::new();
    query
        .expect_get_active()
        .times(1)
        .return_once(|| Ok(vec![sample_dto(1)]));

    let (status, _, body) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees/active"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case("/api/employees/email/%20", "Email is required")]
#[case("/api/employees/department/%20%20", "Department is required")]
#[actix_web::test]
async fn blank_lookup_parameters_are_rejected(#[case] uri: &str, #[case] expected: &str) {
    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn unknown_email_is_404() {
    let mut query = MockEmployeesQuery::new();
    query
        .expect_get_by_email()
        .withf(|email| email == "nobody@company.com")
        .return_once(|_| Ok(None));

    let (status, _, body) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees/email/nobody@company.com"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        message(&body),
        Some("Employee with email nobody@company.com not found")
    );
}

#[rstest]
#[actix_web::test]
async fn department_lookup_passes_the_raw_segment() {
    let mut query = MockEmployeesQuery::new();
    query
        .expect_get_by_department()
        .withf(|department| department == "engineering")
        .times(1)
        .return_once(|_| Ok(vec![sample_dto(1)]));

    let (status, _, _) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees/department/engineering"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn head_reports_existence(#[case] exists: bool, #[case] expected: StatusCode) {
    let mut query = MockEmployeesQuery::new();
    query.expect_exists().return_once(move |_| Ok(exists));

    let (status, _, _) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri("/api/employees/1"),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_location() {
    let mut command = MockEmployeesCommand::new();
    command
        .expect_create()
        .withf(|request| request.email == "ada.lovelace@company.com")
        .times(1)
        .return_once(|_| Ok(sample_dto(4)));

    let (status, headers, body) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(create_request("Ada", "Lovelace", "Engineering")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers
            .get(actix_web::http::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/api/employees/4")
    );
    assert_eq!(body.get("Id"), Some(&json!(4)));
}

#[rstest]
#[actix_web::test]
async fn create_reports_every_violation_without_calling_the_service() {
    let mut request = create_request("Ada", "Lovelace", "Engineering");
    request.first_name = "Ada9".into();
    request.email = "not-an-email".into();
    request.salary = Decimal::ZERO;

    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(request),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some("Validation failed"));
    let fields: Vec<&str> = body
        .pointer("/Details/Violations")
        .and_then(Value::as_array)
        .expect("violations present")
        .iter()
        .filter_map(|violation| violation.get("Field").and_then(Value::as_str))
        .collect();
    assert_eq!(fields, vec!["FirstName", "Email", "Salary"]);
}

#[rstest]
#[actix_web::test]
async fn create_rejects_future_hire_dates_using_the_clock() {
    let mut request = create_request("Ada", "Lovelace", "Engineering");
    request.hire_date = NaiveDate::from_ymd_opt(2024, 6, 2).expect("valid date");

    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(request),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/Details/Violations/0/Message"),
        Some(&json!("Hire date cannot be in the future"))
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_400_envelope() {
    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"FirstName\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("Code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(body.pointer("/Details/Code"), Some(&json!("invalid_body")));
}

#[rstest]
#[actix_web::test]
async fn update_conflict_is_409() {
    let mut command = MockEmployeesCommand::new();
    command.expect_update().return_once(|_, request| {
        Err(Error::conflict(format!(
            "Employee with email {} already exists",
            request.email
        )))
    });
    let request = UpdateEmployeeDto::from(sample_dto(2));

    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::put()
            .uri("/api/employees/2")
            .set_json(request),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        message(&body),
        Some("Employee with email bill.kishore@company.com already exists")
    );
}

#[rstest]
#[case(true, StatusCode::NO_CONTENT)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_maps_outcome_to_status(#[case] removed: bool, #[case] expected: StatusCode) {
    let mut command = MockEmployeesCommand::new();
    command
        .expect_delete()
        .withf(|id| id.get() == 5)
        .return_once(move |_| Ok(removed));

    let (status, _, _) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::delete().uri("/api/employees/5"),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[case("deactivate")]
#[case("activate")]
#[actix_web::test]
async fn status_toggles_return_204(#[case] action: &str) {
    let mut command = MockEmployeesCommand::new();
    command.expect_deactivate().returning(|_| Ok(true));
    command.expect_activate().returning(|_| Ok(true));

    let (status, _, _) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::patch().uri(&format!("/api/employees/3/{action}")),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn promote_validates_payload() {
    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::patch()
            .uri("/api/employees/1/promote")
            .set_json(json!({ "Position": "", "Salary": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/Details/Violations")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(2)
    );
}

#[rstest]
#[actix_web::test]
async fn promote_missing_employee_is_404() {
    let mut command = MockEmployeesCommand::new();
    command.expect_promote().return_once(|_, _| Ok(None));

    let (status, _, _) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::patch()
            .uri("/api/employees/8/promote")
            .set_json(json!({ "Position": "Lead", "Salary": 120000 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn transfer_rejects_unknown_department() {
    let (status, _, body) = send(
        MockEmployeesQuery::new(),
        MockEmployeesCommand::new(),
        actix_test::TestRequest::patch()
            .uri("/api/employees/1/transfer")
            .set_json(json!({ "Department": "Research" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/Details/Violations/0/Message"),
        Some(&json!("Please select a valid department"))
    );
}

#[rstest]
#[actix_web::test]
async fn salary_update_returns_the_employee() {
    let mut command = MockEmployeesCommand::new();
    command
        .expect_update_salary()
        .withf(|_, request| request.salary == Decimal::new(99_000, 0))
        .return_once(|_, _| Ok(Some(sample_dto(1))));

    let (status, _, _) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::patch()
            .uri("/api/employees/1/salary")
            .set_json(json!({ "Salary": 99000 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn contact_conflict_is_409() {
    let mut command = MockEmployeesCommand::new();
    command
        .expect_update_contact()
        .return_once(|_, _| Err(Error::conflict("Employee with email x@company.com already exists")));

    let (status, _, _) = send(
        MockEmployeesQuery::new(),
        command,
        actix_test::TestRequest::patch()
            .uri("/api/employees/1/contact")
            .set_json(json!({ "Email": "x@company.com", "PhoneNumber": "+1 555 0100" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockEmployeesQuery::new();
    query
        .expect_get_all()
        .return_once(|| Err(Error::internal("employee store error: poisoned")));

    let (status, _, body) = send(
        query,
        MockEmployeesCommand::new(),
        actix_test::TestRequest::get().uri("/api/employees"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), Some(INTERNAL_ERROR_MESSAGE));
}
