//! Document Flow Integration Tests
//!
//! Drives a `DocumentContext` the way the editor does: build a page, style it,
//! save it, reload it in a second handle, and follow the emitted events.

#[cfg(test)]
mod document_flow_tests {
    use anyhow::Result;
    use mixa_core::config::EditorConfig;
    use mixa_core::db::{DocumentEvent, InMemoryMixStore, MixStore};
    use mixa_core::models::{MixDocument, PropertyValue};
    use mixa_core::operations::{DropPosition, NodeEdit, PropertyPatch};
    use mixa_core::services::DocumentContext;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::time::{timeout, Duration};

    /// Stored document in the exact shape the backend holds
    const STORED_DOCUMENT: &str = r##"{
        "treeData": {
            "id": "root", "tag": "div", "title": "Page", "classes": [], "style": [],
            "content": "",
            "childrens": [
                { "id": "hero", "tag": "section", "title": "Hero", "classes": ["hero", ""],
                  "style": [], "content": "",
                  "childrens": [
                    { "id": "logo", "tag": "img", "title": "Logo", "classes": [], "style": [],
                      "content": "", "childrens": [] },
                    { "id": "headline", "tag": "h1", "title": "Headline", "classes": [],
                      "style": [], "content": "Welcome", "childrens": [] }
                  ] }
            ]
        },
        "cssData": {
            "classes": {
                "hero": { "name": "hero", "properties": [
                    { "id": "p1", "type": "display", "value": "flex" },
                    { "id": "p2", "type": "padding",
                      "value": { "type": "multiple", "value": [
                          { "type": "px", "value": 24 }, { "type": "percent", "value": 5 } ] } }
                ] },
                "alert": { "name": "alert", "properties": [
                    { "id": "p1", "type": "color", "value": { "type": "hex", "value": "#ff0000" } }
                ] }
            }
        }
    }"##;

    async fn seeded_store() -> Result<(Arc<InMemoryMixStore>, i64)> {
        let store = Arc::new(InMemoryMixStore::new());
        let content: serde_json::Value = serde_json::from_str(STORED_DOCUMENT)?;
        let mix = store.create_mix(content).await?;
        Ok((store, mix.id))
    }

    #[tokio::test]
    async fn test_load_edit_save_reload() -> Result<()> {
        let (store, mix_id) = seeded_store().await?;

        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.load(store.clone(), mix_id).await?;
        assert_eq!(
            ctx.stylesheet(),
            ".hero { display: flex; padding: 24px 5%; }\n.alert { color: #ff0000; }"
        );

        // Dropping inside the void logo lands right after it
        let card = ctx.create_element("root")?.expect("root exists");
        ctx.move_element(&card, "logo", DropPosition::Inside)?;
        ctx.update_node(&card, NodeEdit::AppendClass("alert".to_string()))?;
        let children: Vec<String> = ctx.tree().children("hero").map(|n| n.id.clone()).collect();
        assert_eq!(children, vec!["logo".to_string(), card.clone(), "headline".to_string()]);

        let weight = ctx.add_property("alert", "font-weight").expect("class exists");
        ctx.update_property("alert", &weight, PropertyPatch::value("bold"));
        ctx.save().await?;

        let mut reopened = DocumentContext::new(EditorConfig::default());
        reopened.load(store.clone(), mix_id).await?;
        assert_eq!(reopened.snapshot(), ctx.snapshot());
        assert_eq!(
            reopened.class_css("alert").as_deref(),
            Some("color: #ff0000; font-weight: bold;")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_shape_is_preserved() -> Result<()> {
        let (store, mix_id) = seeded_store().await?;

        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.load(store.clone(), mix_id).await?;
        ctx.save().await?;

        let stored = store.get_mix(mix_id).await?.json_content;
        let original: serde_json::Value = serde_json::from_str(STORED_DOCUMENT)?;
        assert_eq!(stored, original);

        // Class order survives the round trip as text
        let text = serde_json::to_string(&stored)?;
        let reparsed: MixDocument = serde_json::from_str(&text)?;
        let names: Vec<&str> = reparsed.css_data.class_names().collect();
        assert_eq!(names, vec!["hero", "alert"]);
        assert!(text.contains("\"childrens\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_class_order_survives_store_round_trip() -> Result<()> {
        let store = Arc::new(InMemoryMixStore::new());
        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.attach(store.clone());

        ctx.add_class(Some("zeta"));
        ctx.add_class(Some("alpha"));
        ctx.add_class(Some("mid"));
        let mix_id = ctx.save().await?;

        let reloaded = store.get_mix(mix_id).await?.document()?;
        let names: Vec<&str> = reloaded.css_data.class_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let mut reopened = DocumentContext::new(EditorConfig::default());
        reopened.load(store, mix_id).await?;
        let names: Vec<&str> = reopened.css_tree().class_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_saved_event_follows_save() -> Result<()> {
        let store = Arc::new(InMemoryMixStore::new());
        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.attach(store.clone());
        let mut rx = ctx.subscribe();

        let mix_id = ctx.save().await?;

        let event = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("Event should be emitted within 1 second")
            .expect("Should receive event");
        assert_eq!(event, DocumentEvent::Saved { mix_id });
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_ids_after_delete_are_ignored() -> Result<()> {
        let (store, mix_id) = seeded_store().await?;
        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.load(store, mix_id).await?;

        ctx.select(Some("headline"));
        assert!(ctx.delete_element("hero")?);
        assert_eq!(ctx.selected_id(), None);

        // Edits queued by the UI before the delete landed
        assert!(!ctx.update_node("headline", NodeEdit::SetContent("Hi".to_string()))?);
        assert!(!ctx.move_element("logo", "root", DropPosition::Inside)?);
        assert_eq!(ctx.tree().node_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_bare_root_document() -> Result<()> {
        let store = Arc::new(InMemoryMixStore::new());
        let mix = store
            .create_mix(json!({ "treeData": { "id": "root" } }))
            .await?;

        let mut ctx = DocumentContext::new(EditorConfig::default());
        ctx.load(store, mix.id).await?;

        let child = ctx.create_element("root")?.expect("root exists");
        let before = ctx.snapshot().clone();
        ctx.move_element(&child, "root", DropPosition::Inside)?;
        assert_eq!(ctx.snapshot(), &before);

        let class = ctx.add_class(None);
        let id = ctx.add_property(&class, "font-size").expect("class exists");
        assert_eq!(
            ctx.css_tree().class(&class).and_then(|c| c.property(&id)).map(|p| p.value.clone()),
            Some(PropertyValue::typed("px", 16))
        );
        assert_eq!(ctx.class_css(&class).as_deref(), Some("font-size: 16px;"));
        Ok(())
    }
}
