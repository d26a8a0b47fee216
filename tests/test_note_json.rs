use quicknotes::domain::Note;
use anyhow::Result;

#[test]
fn given_note_when_serializing_to_json_then_contains_all_fields() -> Result<()> {
    // Arrange
    let note = Note {
        id: Some(1234567890),
        title: "Test title".to_string(),
        description: "Test description".to_string(),
        timestamp: 1700000000000,
    };

    // Act
    let json = serde_json::to_string_pretty(&note)?;

    // Assert
    assert!(json.contains(r#""id": 1234567890"#));
    assert!(json.contains(r#""title": "Test title""#));
    assert!(json.contains(r#""description": "Test description""#));
    assert!(json.contains(r#""timestamp": 1700000000000"#));
    Ok(())
}

#[test]
fn given_unsaved_note_when_serializing_then_id_is_null() -> Result<()> {
    // Arrange
    let note = Note::new("Draft", "");

    // Act
    let json = serde_json::to_string(&note)?;

    // Assert
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert!(parsed["id"].is_null());
    assert_eq!(parsed["title"], "Draft");
    assert_eq!(parsed["timestamp"], 0);
    Ok(())
}
