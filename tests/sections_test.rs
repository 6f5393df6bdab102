//! End-to-end tests for special sections.

use textpress::{convert_text, convert_text_with_options, ConvertOptions, RenderOptions};

#[test]
fn test_faq_pairs_questions_and_answers() {
    let html = convert_text("FAQ\nWhat is X?\nX is Y.\nWhy use X?\nBecause Z.");
    assert_eq!(
        html,
        "<div class=\"faq_blog\">\n<h2>Frequently Asked Questions</h2>\n<h3>What is X?</h3>\n<p>X is Y.</p>\n<h3>Why use X?</h3>\n<p>Because Z.</p>\n</div>"
    );
}

#[test]
fn test_faq_answer_without_question() {
    let html = convert_text("<FAQ>\nSome context first.\nHow does it work?\nQuietly.\n<FAQ END>");
    let context = html.find("<p>Some context first.</p>").unwrap();
    let question = html.find("<h3>How does it work?</h3>").unwrap();
    assert!(context < question);
}

#[test]
fn test_faq_question_repeated_in_body() {
    let html = convert_text("What is X?\nBody text here.\n<FAQ>\nWhat is X?\nX is Y.\n<FAQ END>");
    assert!(html.starts_with("<h3 id=\"what-is-x\">What is X?</h3>\n<p>Body text here.</p>"));
    assert!(html.ends_with("<h3>What is X?</h3>\n<p>X is Y.</p>\n</div>"));
}

#[test]
fn test_faq_answers_starting_with_auxiliary_verbs() {
    let html = convert_text("<FAQ>\nCan I cancel?\nDo not worry about it\n<FAQ END>");
    assert!(html.contains("<h3>Can I cancel?</h3>\n<p>Do not worry about it</p>"));
}

#[test]
fn test_table_rows_padded_to_header() {
    let html = convert_text("<TABLE>\nA|B|C\n1|2\n<TABLE END>");
    assert!(html.starts_with("<div class=\"travel_table\">"));
    assert!(html.contains("<tr><th>A</th><th>B</th><th>C</th></tr>"));
    assert!(html.contains("<tr><td>1</td><td>2</td><td></td></tr>"));
}

#[test]
fn test_legacy_table_markers() {
    let html = convert_text("[TABLE START]\nCity\tDays\nRome\t3\n[TABLE END]\nAfter the table.");
    assert!(html.contains("<tr><th>City</th><th>Days</th></tr>"));
    assert!(html.contains("<tr><td>Rome</td><td>3</td></tr>"));
    assert!(html.ends_with("<p>After the table.</p>"));
}

#[test]
fn test_pros_cons_split_at_midpoint() {
    let html = convert_text("<PROS-AND-CONS>\nFast\nCheap\nLoud\nHeavy\n<PROS-AND-CONS END>");
    let pros = html.find("<div class=\"pros\">").unwrap();
    let cons = html.find("<div class=\"cons\">").unwrap();
    let fast = html.find("<li>Fast</li>").unwrap();
    let cheap = html.find("<li>Cheap</li>").unwrap();
    let loud = html.find("<li>Loud</li>").unwrap();
    assert!(pros < fast && cheap < cons && cons < loud);
    assert!(html.starts_with("<div class=\"expense_track\">"));
}

#[test]
fn test_pros_cons_odd_count() {
    let html = convert_text("<PROS-AND-CONS>\nA1\nA2\nA3\n<PROS-AND-CONS END>");
    let cons = html.find("<div class=\"cons\">").unwrap();
    assert!(html.find("<li>A2</li>").unwrap() < cons);
    assert!(html.find("<li>A3</li>").unwrap() > cons);
}

#[test]
fn test_steps_titles_and_numbering() {
    let html = convert_text("<STEPS>\nPrepare: gather the tools\nmix everything together\n<STEPS END>");
    assert!(html.starts_with("<div class=\"listing-bx\">\n<ol>"));
    assert!(html.contains("<li><strong>Prepare:</strong> gather the tools</li>"));
    assert!(html.contains("<li><strong>Step 2:</strong> mix everything together</li>"));
}

#[test]
fn test_key_takeaways_visible_trigger_heading() {
    let html = convert_text("Key Takeaways\n- Fast setup\n- Low cost");
    assert!(html.starts_with("<h2 id=\"key-takeaways\">Key Takeaways</h2>"));
    assert!(html.contains("<div class=\"kta-list\">"));
    assert!(html.contains("<li>Fast setup</li>\n<li>Low cost</li>"));
}

#[test]
fn test_cta_defaults_fill_missing_fields() {
    let html = convert_text("<CTA>\nTry it today\n<CTA END>");
    assert!(html.contains("<div class=\"callout_newbox\">"));
    assert!(html.contains("<strong>Try it today</strong>"));
    assert!(html.contains("<a class=\"callout_btn\" href=\"#\">Get Started</a>"));
}

#[test]
fn test_comparison_rows() {
    let html = convert_text(
        "<COMPARISON>\nFeature | Basic | Pro\nStorage | 10 GB | 1 TB\nEverything else is identical\n<COMPARISON END>",
    );
    assert!(html.starts_with("<div class=\"comparison-table\">"));
    assert!(html.contains("<tr><th>Feature</th><th>Basic</th><th>Pro</th></tr>"));
    assert!(html.contains("<tr><td>Storage</td><td>10 GB</td><td>1 TB</td></tr>"));
    assert!(html.contains("<td colspan=\"3\">Everything else is identical</td>"));
}

#[test]
fn test_bullet_list_section() {
    let html = convert_text("<BENEFITS>\nSaves time\nSaves money\n<BENEFITS END>");
    assert_eq!(
        html,
        "<div class=\"bullet-new-box\">\n<ul>\n<li>Saves time</li>\n<li>Saves money</li>\n</ul>\n</div>"
    );
}

#[test]
fn test_ignore_section_vanishes() {
    let html = convert_text("First part here.\n<IGNORE>\nDraft notes only.\n<IGNORE END>\nSecond part here.");
    assert_eq!(html, "<p>First part here.</p>\n<p>Second part here.</p>");
}

#[test]
fn test_unknown_tag_renders_paragraphs() {
    let html = convert_text("<SIDEBAR>\nA side note.\n<SIDEBAR END>");
    assert_eq!(html, "<p>A side note.</p>");
}

#[test]
fn test_unterminated_section_closes_at_end() {
    let html = convert_text("<BENEFITS>\nSaves time");
    assert!(html.contains("<li>Saves time</li>"));
}

#[test]
fn test_sections_never_nest() {
    let html = convert_text("<FAQ>\nWhat is X?\nX is Y.\n<STEPS>\nBegin: open the box\n<STEPS END>");
    let faq = html.find("<div class=\"faq_blog\">").unwrap();
    let steps = html.find("<div class=\"listing-bx\">").unwrap();
    let faq_end = faq + html[faq..].find("</div>").unwrap();
    assert!(faq_end < steps);
}

#[test]
fn test_custom_labels() {
    let options = ConvertOptions::new().with_render_options(
        RenderOptions::new()
            .with_faq_title("Questions")
            .with_key_takeaways_label("In Short"),
    );
    let html = convert_text_with_options(
        "<FAQ>\nWhy?\nBecause.\n<FAQ END>\n<KEY-POINTS>\nOne\n<KEY-POINTS END>",
        &options,
    );
    assert!(html.contains("<h2>Questions</h2>"));
    assert!(html.contains("<p><strong>In Short</strong></p>"));
}
