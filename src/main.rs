#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cobrafacil::cli::run().await
}

// The wasm build is loaded as a library by the service worker script
#[cfg(target_arch = "wasm32")]
fn main() {}
