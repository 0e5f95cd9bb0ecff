// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lookout serve` command implementation.
//!
//! Opens the store, starts the gateway and the trigger loop, and runs until
//! SIGINT or SIGTERM. On shutdown the gateway stops accepting requests,
//! in-flight handlers drain, and the store is checkpointed and closed.

use std::sync::Arc;

use lookout_agent::shutdown;
use lookout_config::LookoutConfig;
use lookout_core::{Adapter, IngressHandler, LookoutError};
use lookout_gateway::{AuthConfig, GatewayState, ServerConfig};
use tracing::{error, info, warn};

use crate::runtime;

pub async fn run_serve(config: LookoutConfig) -> Result<(), LookoutError> {
    let (ctx, store) = runtime::context(&config).await?;
    let bus = ctx.bus.clone();
    let daemon = lookout_agent::build_daemon(&config, ctx)?;

    let cancel = shutdown::install_signal_handler();

    let gateway_handle = if config.gateway.enabled {
        if config.gateway.bearer_token.is_none() {
            warn!("gateway has no bearer token; every authenticated request will be rejected");
        }
        let handler: Arc<dyn IngressHandler> = Arc::new(daemon.dispatcher().clone());
        let state = GatewayState::new(
            handler,
            bus,
            store.clone(),
            AuthConfig::new(config.gateway.bearer_token.clone()),
        );
        let server_config = ServerConfig {
            host: config.gateway.host.clone(),
            port: config.gateway.port,
        };
        let gw_cancel = cancel.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = lookout_gateway::start_server(&server_config, state, gw_cancel.clone()).await {
                error!(error = %e, "gateway failed");
                gw_cancel.cancel();
            }
        }))
    } else {
        info!("gateway disabled");
        None
    };

    daemon.run(cancel.clone()).await;

    if let Some(handle) = gateway_handle {
        cancel.cancel();
        if let Err(e) = handle.await {
            warn!(error = %e, "gateway task ended abnormally");
        }
    }

    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "store checkpoint failed");
    }
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().await?,
        Err(_) => warn!("store still shared at shutdown, skipping close"),
    }

    info!("lookout serve shutdown complete");
    Ok(())
}
