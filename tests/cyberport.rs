mod common;

use common::StaticSource;
use ecommerce_parser::EcommerceParser;
use rust_decimal_macros::dec;

const PRODUCT_URL: &str =
    "https://www.cyberport.de/apple-macbook-pro-13-3-retina-2017-i5-2-3-8-128-gb-iip640-space-grau-mpxq2d-a-1A09-0AY_8465.html";

fn parser(fixture: &str) -> EcommerceParser<StaticSource> {
    EcommerceParser::new(StaticSource::from_fixture(fixture))
}

#[tokio::test]
async fn extracts_regular_product() {
    let product = parser("cyberport/regular.html")
        .parse_link(PRODUCT_URL)
        .await
        .unwrap();

    assert_eq!(product.url, PRODUCT_URL);
    assert_eq!(product.external_id, "1A09-0AY_8465");
    assert_eq!(
        product.title,
        "Apple MacBook Pro 13,3\" Retina 2017 i5 2,3/8/128 GB IIP640 Space Grau MPXQ2D/A"
    );
    assert!(product
        .description
        .as_deref()
        .unwrap()
        .starts_with("Es ist schneller und leistungsstärker"));

    assert_eq!(product.price.current_price, dec!(1333.00));
    assert_eq!(product.price.currency, "EUR");
    assert_eq!(product.price.discount, None);
}

#[tokio::test]
async fn gallery_is_absent_from_served_markup() {
    let product = parser("cyberport/regular.html")
        .parse_link(PRODUCT_URL)
        .await
        .unwrap();

    assert!(product.images.is_empty());
}

#[tokio::test]
async fn computes_discount_from_old_price_box() {
    let product = parser("cyberport/discounted.html")
        .parse_link(PRODUCT_URL)
        .await
        .unwrap();

    assert_eq!(product.price.current_price, dec!(89.90));

    let discount = product.price.discount.unwrap();
    assert_eq!(discount.old_price, dec!(109.00));
    assert_eq!(discount.amount, dec!(19.10));
    assert_eq!(discount.percentage, dec!(17.52));
}
