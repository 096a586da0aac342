use quotebook_core::db::open_db_in_memory;
use quotebook_core::{
    FieldError, QuoteField, QuotePayload, QuoteService, QuoteServiceError, SqliteQuoteRepository,
};
use serde_json::{json, Value};

#[test]
fn create_validates_then_persists_coerced_values() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());

    let mut body = valid_body();
    body["quantity"] = json!("3");
    body["unit_price"] = json!(" 10.00 ");
    body["item_code"] = json!(501);
    let order_number = service
        .create_quote(&QuotePayload::from_json(&body))
        .unwrap();

    let quote = service.get_quote(order_number).unwrap();
    assert_eq!(quote.fields.quantity, 3.0);
    assert_eq!(quote.fields.unit_price, 10.0);
    assert_eq!(quote.fields.item_code, "501");
    assert_eq!(quote.fields.customer_birthdate.as_deref(), Some("1980-04-12"));
}

#[test]
fn get_response_mirrors_submitted_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());

    let body = valid_body();
    let order_number = service
        .create_quote(&QuotePayload::from_json(&body))
        .unwrap();

    let mut expected = body;
    expected["order_number"] = json!(order_number);
    let serialized = serde_json::to_value(service.get_quote(order_number).unwrap()).unwrap();
    assert_eq!(serialized, expected);
}

#[test]
fn invalid_create_reports_all_fields_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());

    let mut body = valid_body();
    body["quantity"] = json!(3);
    body["unit_price"] = json!(10.0);
    body["total_price"] = json!(29.99);
    body["tax_code"] = json!("  ");
    body["labor_markup"] = json!(-1);

    let err = service
        .create_quote(&QuotePayload::from_json(&body))
        .unwrap_err();
    match err {
        QuoteServiceError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
            assert_eq!(errors.get(QuoteField::TaxCode), Some(FieldError::Required));
            assert_eq!(
                errors.get(QuoteField::LaborMarkup),
                Some(FieldError::Negative)
            );
            assert_eq!(
                errors.get(QuoteField::TotalPrice),
                Some(FieldError::InconsistentTotal)
            );
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(service.list_quotes(None).unwrap().is_empty());
}

#[test]
fn get_missing_quote_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.get_quote(7),
        Err(QuoteServiceError::NotFound(7))
    ));
}

#[test]
fn update_requires_full_field_set() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());
    let order_number = service
        .create_quote(&QuotePayload::from_json(&valid_body()))
        .unwrap();

    let partial = QuotePayload::from_json(&json!({ "description": "Only this" }));
    let err = service.update_quote(order_number, &partial).unwrap_err();
    assert!(matches!(err, QuoteServiceError::Validation(ref errors) if errors.len() == 20));

    let unchanged = service.get_quote(order_number).unwrap();
    assert_eq!(unchanged.fields.description, "Boiler maintenance");
}

#[test]
fn update_with_full_payload_rewrites_record() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());
    let order_number = service
        .create_quote(&QuotePayload::from_json(&valid_body()))
        .unwrap();

    let mut body = valid_body();
    body["quantity"] = json!(5);
    body["total_price"] = json!(50);
    body["customer_last_name"] = json!("Rossi-Bianchi");

    let updated = service
        .update_quote(order_number, &QuotePayload::from_json(&body))
        .unwrap();
    assert_eq!(updated, 1);

    let quote = service.get_quote(order_number).unwrap();
    assert_eq!(quote.fields.quantity, 5.0);
    assert_eq!(quote.fields.total_price, 50.0);
    assert_eq!(quote.fields.customer_last_name, "Rossi-Bianchi");

    let missing = service
        .update_quote(order_number + 1, &QuotePayload::from_json(&body))
        .unwrap();
    assert_eq!(missing, 0);
}

#[test]
fn delete_then_get_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());
    let order_number = service
        .create_quote(&QuotePayload::from_json(&valid_body()))
        .unwrap();

    assert_eq!(service.delete_quote(order_number).unwrap(), 1);
    assert!(matches!(
        service.get_quote(order_number),
        Err(QuoteServiceError::NotFound(id)) if id == order_number
    ));
}

#[test]
fn list_and_autocomplete_delegate_name_search() {
    let conn = open_db_in_memory().unwrap();
    let service = QuoteService::new(SqliteQuoteRepository::try_new(&conn).unwrap());

    let mut body = valid_body();
    let mario = service
        .create_quote(&QuotePayload::from_json(&body))
        .unwrap();
    body["customer_first_name"] = json!("Giulia");
    body["customer_last_name"] = json!("Verdi");
    service
        .create_quote(&QuotePayload::from_json(&body))
        .unwrap();

    let listed = service.list_quotes(Some("rossi mario")).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].order_number, mario);

    assert_eq!(service.list_quotes(Some("  ")).unwrap().len(), 2);
    assert_eq!(service.autocomplete("ver").unwrap(), vec!["Giulia Verdi"]);
}

fn valid_body() -> Value {
    json!({
        "customer_first_name": "Mario",
        "customer_last_name": "Rossi",
        "customer_birthdate": "1980-04-12",
        "tax_code": "RSSMRA80D12H501U",
        "item_type": "service",
        "item_code": "SRV-001",
        "description": "Boiler maintenance",
        "unit": "h",
        "quantity": 3.0,
        "unit_price": 10.0,
        "total_price": 30.0,
        "mr_unit_price": 1.5,
        "mr_total_price": 4.5,
        "mr_markup": 0.1,
        "labor_unit_price": 25.5,
        "labor_total_price": 76.5,
        "labor_markup": 10.0,
        "pm_unit_price": 0.0,
        "pm_total_price": 0.0,
        "cm_unit_price": 2.25,
        "cm_total_price": 6.75
    })
}
