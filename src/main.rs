// src/main.rs
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn pick_renderer() -> eframe::Renderer {
    match env::var("REELPICK_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            // Default: Windows = WGPU (DX12), Others = Glow (GL)
            #[cfg(target_os = "windows")]
            { eframe::Renderer::Wgpu }
            #[cfg(not(target_os = "windows"))]
            { eframe::Renderer::Glow }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    #[cfg(target_os = "linux")]
    {
        info!("XDG_SESSION_TYPE={:?}", env::var_os("XDG_SESSION_TYPE"));
        info!("WAYLAND_DISPLAY={:?}", env::var_os("WAYLAND_DISPLAY"));
        info!("DISPLAY={:?}", env::var_os("DISPLAY"));
    }

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        multisampling: 0,
        ..Default::default()
    };

    match eframe::run_native(
        "Reelpick",
        options,
        Box::new(|_cc| Ok(Box::new(reelpick::app::ReelpickApp::default()))),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try REELPICK_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
