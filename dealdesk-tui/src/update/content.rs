//! Browsing-mode updates for the active list.

use crate::message::ContentMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: &ContentMessage) {
    let idx = app.current.min(app.controllers.len() - 1);
    let Some(ctrl) = app.controllers.get_mut(idx) else {
        return;
    };

    match msg {
        ContentMessage::SelectNext => ctrl.select_next(),
        ContentMessage::SelectPrev => ctrl.select_prev(),
        ContentMessage::SelectFirst => ctrl.select_first(),
        ContentMessage::SelectLast => ctrl.select_last(),
        ContentMessage::NextPage => app.backend.block_on(ctrl.next_page()),
        ContentMessage::PrevPage => app.backend.block_on(ctrl.prev_page()),
        ContentMessage::New => ctrl.open_new(),
        ContentMessage::Edit => ctrl.open_edit(),
        ContentMessage::Delete => ctrl.request_delete(),
        ContentMessage::StartSearch => {
            app.search_input = Some(ctrl.search().to_string());
        }
        ContentMessage::ClearSearch => {
            app.backend.block_on(ctrl.set_search(""));
        }
        ContentMessage::StartUpload => {
            if ctrl.descriptor().supports_upload {
                app.upload_input = Some(String::new());
            } else {
                app.set_status("Uploads are only available on the Documents tab");
            }
        }
    }
}
