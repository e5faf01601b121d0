use crate::fixtures;
use crate::parsers::model_page::{self, ImageRules};
use scraper::Html;

#[test]
fn test_model_info_prefers_variant_image() {
    let doc = Html::parse_document(fixtures::EV3_PAGE);
    let info = model_page::extract_model_info(&doc, fixtures::EV3_URL, &ImageRules::default());

    assert_eq!(info.model_name, "Kia EV3");
    assert_eq!(
        info.image_url,
        "https://www.bilhandlare.example/wp-content/uploads/ev3-variant.png"
    );
}

#[test]
fn test_placeholder_falls_back_to_og_image() {
    let doc = Html::parse_document(fixtures::EV9_PAGE);
    let info = model_page::extract_model_info(&doc, fixtures::EV9_URL, &ImageRules::default());

    assert_eq!(info.model_name, "Kia EV9");
    assert_eq!(
        info.image_url,
        "https://www.bilhandlare.example/wp-content/uploads/ev9-og.jpg"
    );
}

#[test]
fn test_image_outside_uploads_is_ignored() {
    let html = r#"<html><head>
        <meta property="og:image" content="https://cdn.example/social.jpg">
    </head><body>
        <h1>Kia Stonic</h1>
        <div class="img-container"><img data-src="https://cdn.example/stonic.png"></div>
    </body></html>"#;
    let doc = Html::parse_document(html);
    let info = model_page::extract_model_info(&doc, fixtures::BASE, &ImageRules::default());

    assert_eq!(info.model_name, "Kia Stonic");
    assert_eq!(info.image_url, "");
}

#[test]
fn test_data_src_used_when_src_missing() {
    let html = r#"<div class="img-container">
        <img data-src="https://www.bilhandlare.example/wp-content/uploads/xceed.png">
    </div>"#;
    let doc = Html::parse_document(html);
    let info = model_page::extract_model_info(&doc, fixtures::BASE, &ImageRules::default());

    assert_eq!(info.model_name, "");
    assert_eq!(
        info.image_url,
        "https://www.bilhandlare.example/wp-content/uploads/xceed.png"
    );
}

#[test]
fn test_financing_targets() {
    let doc = Html::parse_document(fixtures::EV3_PAGE);
    let targets = model_page::extract_financing_targets(&doc, fixtures::EV3_URL);

    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].financing_type, "Privatleasing");
    assert_eq!(targets[0].url, fixtures::EV3_LEASING_URL);
    assert_eq!(targets[1].financing_type, "Billån");
    assert_eq!(targets[1].url, fixtures::EV3_LOAN_URL);
}

#[test]
fn test_radio_labels() {
    let doc = Html::parse_document(fixtures::EV3_LEASING);
    let labels = model_page::extract_radio_labels(&doc);

    assert_eq!(
        labels,
        vec![
            "Air 3 412 kr/mån",
            "GT-Line 4 195 kr/mån",
            "Air 3 200 kr/mån",
            "+ Dragkrok 299 kr/mån",
            "Privatleasing 12-36 mån 500 kr/mån",
            "Välj färg",
        ]
    );
}

#[test]
fn test_label_after_text_node_still_follows_radio() {
    let html = "<input type=\"RADIO\" id=\"a\">\n  <label for=\"a\">Plus 3 100 kr/mån</label>";
    let doc = Html::parse_document(html);
    assert_eq!(model_page::extract_radio_labels(&doc), vec!["Plus 3 100 kr/mån"]);
}

#[test]
fn test_wrapped_radio_type_is_case_insensitive() {
    let html = r#"<form>
  <label><input type="Radio" name="p"> Plus 3 100 kr/mån</label>
  <label><input type="checkbox" name="x"> Vinterhjul 250 kr/mån</label>
</form>"#;
    let doc = Html::parse_document(html);
    assert_eq!(model_page::extract_radio_labels(&doc), vec!["Plus 3 100 kr/mån"]);
}
