use chrono::NaiveDate;
use storefront_client::card::{
    card_type, format_card_number, is_valid_card_number, mask_card_number, validate_card_info_at,
    CardField, CardInfo, CardType,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_common_test_cards_by_network() {
    let cards = [
        ("4242 4242 4242 4242", CardType::Visa, "**** **** **** 4242"),
        ("5555-5555-5555-4444", CardType::Mastercard, "**** **** **** 4444"),
        ("2223003122003222", CardType::Mastercard, "**** **** **** 3222"),
        ("3782 822463 10005", CardType::Amex, "**** ****** *0005"),
        ("6011 1111 1111 1117", CardType::Discover, "**** **** **** 1117"),
    ];

    for (number, network, masked) in cards {
        assert!(is_valid_card_number(number), "{} should be valid", number);
        assert_eq!(card_type(number), network, "{}", number);
        assert_eq!(mask_card_number(number), masked);
    }
}

#[test]
fn test_amex_is_grouped_four_six_five() {
    assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
    assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
}

#[test]
fn test_amex_form_needs_four_digit_cvv() {
    let mut info = CardInfo {
        number: "378282246310005".to_string(),
        holder: "Grace Hopper".to_string(),
        expiry: "10/26".to_string(),
        cvv: "123".to_string(),
    };

    let validation = validate_card_info_at(&info, today());
    assert!(!validation.is_valid);
    assert_eq!(validation.error(CardField::Cvv), Some("CVV must be 4 digits"));

    info.cvv = "1234".to_string();
    assert!(validate_card_info_at(&info, today()).is_valid);
}

#[test]
fn test_every_bad_field_is_reported_in_form_order() {
    let info = CardInfo {
        number: "1234 5678".to_string(),
        holder: "Cher".to_string(),
        expiry: "09/26".to_string(),
        cvv: "12".to_string(),
    };

    let validation = validate_card_info_at(&info, today());
    let fields: Vec<CardField> = validation.errors.keys().copied().collect();

    assert_eq!(
        fields,
        vec![CardField::Number, CardField::Holder, CardField::Expiry, CardField::Cvv]
    );
}

#[test]
fn test_payment_data_never_carries_full_number() {
    let info = CardInfo {
        number: "4111 1111 1111 1111".to_string(),
        holder: "  Ada Lovelace ".to_string(),
        expiry: "12/30".to_string(),
        cvv: "123".to_string(),
    };

    let payment = info.to_payment_data(0);
    let json = serde_json::to_string(&payment).unwrap();

    assert!(!json.contains("4111 1111 1111 1111"));
    assert!(!json.to_lowercase().contains("cvv"));
    assert_eq!(payment.card_holder, "Ada Lovelace");
    assert_eq!(payment.installments, 1);
}
