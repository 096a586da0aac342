use quotebook_core::db::open_db_in_memory;
use quotebook_core::{
    NameFilter, NewQuote, OrderNumber, QuoteRepository, SqliteQuoteRepository, AUTOCOMPLETE_LIMIT,
};

#[test]
fn list_without_filter_returns_all_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let first = repo.create_quote(&new_quote("Anna", "Bianchi", "A-1")).unwrap();
    let second = repo.create_quote(&new_quote("Luca", "Verdi", "B-2")).unwrap();

    let listed = repo.list_quotes(&NameFilter::All).unwrap();
    assert_eq!(order_numbers(&listed), vec![second, first]);
    assert_eq!(listed[0].item_code, "B-2");
    assert_eq!(listed[0].customer_first_name, "Luca");
    assert_eq!(listed[0].customer_last_name, "Verdi");
}

#[test]
fn single_token_matches_first_or_last_name_substring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let by_last = repo.create_quote(&new_quote("Anna", "Rossini", "A")).unwrap();
    let by_first = repo.create_quote(&new_quote("Rossella", "Verdi", "B")).unwrap();
    repo.create_quote(&new_quote("Luca", "Bianchi", "C")).unwrap();

    let listed = repo
        .list_quotes(&NameFilter::parse(Some("ross")))
        .unwrap();
    assert_eq!(order_numbers(&listed), vec![by_first, by_last]);
}

#[test]
fn two_tokens_match_in_either_name_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    let straight = repo.create_quote(&new_quote("Mario", "Rossi", "A")).unwrap();
    let swapped = repo.create_quote(&new_quote("Rossi", "Mario", "B")).unwrap();
    repo.create_quote(&new_quote("Mario", "Bianchi", "C")).unwrap();
    repo.create_quote(&new_quote("Giulia", "Rossi", "D")).unwrap();

    let listed = repo
        .list_quotes(&NameFilter::parse(Some("Mario Rossi extra")))
        .unwrap();
    assert_eq!(order_numbers(&listed), vec![swapped, straight]);
}

#[test]
fn like_wildcards_in_tokens_match_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    repo.create_quote(&new_quote("Mario", "Rossi", "A")).unwrap();
    let literal = repo.create_quote(&new_quote("Ma_rio", "Rossi", "B")).unwrap();

    let listed = repo.list_quotes(&NameFilter::parse(Some("a_r"))).unwrap();
    assert_eq!(order_numbers(&listed), vec![literal]);

    let listed = repo.list_quotes(&NameFilter::parse(Some("%"))).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn autocomplete_with_blank_term_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    repo.create_quote(&new_quote("Mario", "Rossi", "A")).unwrap();

    assert!(repo.autocomplete_names("").unwrap().is_empty());
    assert!(repo.autocomplete_names("   ").unwrap().is_empty());
}

#[test]
fn autocomplete_returns_ten_distinct_names_by_last_then_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    for index in 0..15 {
        let first_name = format!("Mario{:02}", 14 - index);
        let last_name = format!("Rossi{:02}", index % 8);
        repo.create_quote(&new_quote(&first_name, &last_name, "A"))
            .unwrap();
    }
    // Duplicate names collapse into one suggestion.
    repo.create_quote(&new_quote("Mario14", "Rossi00", "B"))
        .unwrap();
    repo.create_quote(&new_quote("Giulia", "Bianchi", "C")).unwrap();

    let names = repo.autocomplete_names("ross").unwrap();
    assert_eq!(names.len(), AUTOCOMPLETE_LIMIT as usize);
    assert_eq!(
        names,
        vec![
            "Mario06 Rossi00",
            "Mario14 Rossi00",
            "Mario05 Rossi01",
            "Mario13 Rossi01",
            "Mario04 Rossi02",
            "Mario12 Rossi02",
            "Mario03 Rossi03",
            "Mario11 Rossi03",
            "Mario02 Rossi04",
            "Mario10 Rossi04",
        ]
    );
}

#[test]
fn autocomplete_matches_first_names_too() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();

    repo.create_quote(&new_quote("Giulia", "Verdi", "A")).unwrap();
    repo.create_quote(&new_quote("Anna", "Giuliani", "B")).unwrap();
    repo.create_quote(&new_quote("Luca", "Neri", "C")).unwrap();

    let names = repo.autocomplete_names("giuli").unwrap();
    assert_eq!(names, vec!["Anna Giuliani", "Giulia Verdi"]);
}

fn order_numbers(summaries: &[quotebook_core::QuoteSummary]) -> Vec<OrderNumber> {
    summaries.iter().map(|item| item.order_number).collect()
}

fn new_quote(first_name: &str, last_name: &str, item_code: &str) -> NewQuote {
    NewQuote {
        customer_first_name: first_name.to_string(),
        customer_last_name: last_name.to_string(),
        customer_birthdate: Some("1975-01-30".to_string()),
        tax_code: "TAX".to_string(),
        item_type: "product".to_string(),
        item_code: item_code.to_string(),
        description: "Valve".to_string(),
        unit: "pz".to_string(),
        quantity: 2.0,
        unit_price: 5.0,
        total_price: 10.0,
        mr_unit_price: 0.0,
        mr_total_price: 0.0,
        mr_markup: 0.0,
        labor_unit_price: 0.0,
        labor_total_price: 0.0,
        labor_markup: 0.0,
        pm_unit_price: 0.0,
        pm_total_price: 0.0,
        cm_unit_price: 0.0,
        cm_total_price: 0.0,
    }
}
