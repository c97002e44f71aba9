use kanal::AsyncReceiver;
use lingopop_types::UiUpdate;

/// Drain display updates onto stdout until the app loop signals shutdown.
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<UiUpdate>) -> anyhow::Result<()> {
    loop {
        match app_to_ui_rx.recv().await? {
            UiUpdate::Frame(text) => println!("{text}"),
            UiUpdate::Notice(text) => println!("! {text}"),
            UiUpdate::Shutdown => {
                tracing::debug!("ui loop shutting down");
                return Ok(());
            }
        }
    }
}
