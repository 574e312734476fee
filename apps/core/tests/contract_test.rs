use flow_zoxide::contract::{ActionDescriptor, DisplayEntry, RpcRequest};
use flow_zoxide::projection;
use serde_json::{json, Value};

#[test]
fn deserializes_host_request_with_settings() {
    let raw = r#"{"method":"query","parameters":["cd D:\\Work"],"settings":{"zoxide_path":"zoxide.exe"}}"#;

    let request: RpcRequest = serde_json::from_str(raw).unwrap();

    assert_eq!(request.method, "query");
    assert_eq!(request.parameters, vec![Value::from("cd D:\\Work")]);
    let settings = request.settings.expect("settings present");
    assert_eq!(settings["zoxide_path"], "zoxide.exe");
}

#[test]
fn optional_fields_are_omitted_on_the_wire() {
    let entry = projection::invalid_directory_entry("/nope");

    let encoded = serde_json::to_value(&entry).unwrap();

    assert_eq!(
        encoded,
        json!({
            "Title": "Invalid directory: /nope",
            "SubTitle": "Please provide a valid directory path",
            "IcoPath": "Images/folder.png",
        })
    );
}

#[test]
fn copy_action_uses_host_clipboard_api() {
    let action = ActionDescriptor::copy_to_clipboard("/x/y");
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({"method": "Flow.Launcher.CopyToClipboard", "parameters": ["/x/y", false, true]})
    );
}

#[test]
fn display_entry_reads_back_from_host_json() {
    let raw = json!({
        "Title": "repo",
        "SubTitle": "Path: /src/repo",
        "IcoPath": "Images/folder.png",
        "Score": 12,
        "JsonRPCAction": {"method": "open_directory", "parameters": ["/src/repo"]},
        "ContextData": "/src/repo",
    });

    let entry: DisplayEntry = serde_json::from_value(raw).unwrap();

    assert_eq!(entry.score, Some(12));
    assert_eq!(entry.action, Some(ActionDescriptor::open_directory("/src/repo")));
}
