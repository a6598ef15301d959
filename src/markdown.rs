use pulldown_cmark::{Event, Options, Parser, html};

/// Render assistant markdown to HTML with raw HTML neutralized.
///
/// pulldown-cmark passes raw HTML through untouched by default; remapping
/// Html/InlineHtml events to Text makes `push_html` escape them, so model
/// output cannot inject markup into the page.
pub fn render(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
