// fieldscan/src/commands/serve.rs
//! `fieldscan serve`

use anyhow::Result;
use log::info;

use fieldscan_core::ScanConfig;

use crate::cli::ServeCommand;
use crate::server::{self, AppState};
use crate::store::FileStore;

pub async fn run(config: ScanConfig, args: &ServeCommand) -> Result<()> {
    let store = FileStore::load(&args.store.store, &args.store.base_url)?;
    let state = AppState::new(config, store)?;
    for report in &state.config.reports {
        info!("Serving report '{}' at /reports/{}", report.title, report.name);
    }
    server::serve(args.listen, state).await
}
