//! A quick tour of the helpers, with logs on stdout

use std::sync::Arc;

use onelib::*;
use serde_json::json;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut lib = OneLib::builder()
        .clipboard(Arc::new(MemoryClipboard::new()))
        .build()?;

    lib.load_document(&json!({
        "tag": "main",
        "attributes": { "id": "app" },
        "children": [{ "tag": "p", "attributes": { "class": "greeting" } }]
    }))?;

    lib.set_html(".greeting", "Hello");
    lib.cls("#app", "ready");
    lib.css(".greeting", [("fontWeight", "bold")]);
    let markup = onelib::dom::serializer::outer_html(lib.dom().document(), 0)?;
    log(["markup:", markup.as_str()]);

    log(["slug:", slug("Hello, World!").as_str()]);
    log(["avg:", avg(&[1.0, 2.0, 4.5]).to_string().as_str()]);
    log(["chunks:", format!("{:?}", chunk(&[1, 2, 3, 4, 5], 2)?).as_str()]);
    log(["id:", uuid().as_str()]);
    log(["today:", lib.format(now())?.as_str()]);

    lib.save("settings", &json!({ "theme": "dark" }))?;
    log(["loaded:", lib.load("settings").unwrap_or_default().to_string().as_str()]);
    log(["copied:", lib.copy("clipboard text").await.to_string().as_str()]);

    let typed = debounce(|text: String| log(["debounced:", text.as_str()]), 100);
    for text in ["h", "he", "hello"] {
        typed.call(text.to_string()).await;
        wait(20).await;
    }
    wait(150).await;

    Ok(())
}
