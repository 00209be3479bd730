//! Updates for the search and upload-path line editors.

use std::fs;
use std::path::Path;

use dealdesk_api::UploadRequest;

use crate::message::LineMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: &LineMessage) {
    match msg {
        LineMessage::Input(c) => {
            if let Some(line) = active_line(app) {
                line.push(*c);
            }
        }
        LineMessage::Backspace => {
            if let Some(line) = active_line(app) {
                line.pop();
            }
        }
        LineMessage::Cancel => {
            app.search_input = None;
            app.upload_input = None;
        }
        LineMessage::Confirm => confirm(app),
    }
}

fn active_line(app: &mut App) -> Option<&mut String> {
    app.search_input.as_mut().or(app.upload_input.as_mut())
}

fn confirm(app: &mut App) {
    if let Some(term) = app.search_input.take() {
        let idx = app.current.min(app.controllers.len() - 1);
        if let Some(ctrl) = app.controllers.get_mut(idx) {
            app.backend.block_on(ctrl.set_search(term));
        }
        return;
    }

    if let Some(path) = app.upload_input.take() {
        upload(app, &path);
    }
}

/// Read a local file and upload it as a new document.
fn upload(app: &mut App, path: &str) {
    let path = Path::new(path.trim());
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        app.set_status("Not a file path");
        return;
    };
    let file_name = file_name.to_string();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            app.set_status(format!("Could not read {}: {e}", path.display()));
            return;
        }
    };

    let request = UploadRequest {
        file_name: file_name.clone(),
        content_type: "application/octet-stream".to_string(),
        bytes,
    };

    let idx = app.current.min(app.controllers.len() - 1);
    let Some(ctrl) = app.controllers.get_mut(idx) else {
        return;
    };
    let status = match app.backend.block_on(ctrl.upload(&request)) {
        Ok(_) => format!("Uploaded '{file_name}'"),
        Err(e) => {
            if e.is_expected() {
                log::warn!("upload rejected: {e}");
            } else {
                log::error!("upload failed: {e}");
            }
            format!("Upload failed: {e}")
        }
    };
    app.set_status(status);
}
