// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Vellum recorder demo
// Records a small scene, composites it twice and reports the bounds.

use anyhow::{Context, Result};
use vellum_core::math::{LinearRgba, Matrix3x2, Rect, Vec2, FRAC_PI_4};
use vellum_core::native::NativeDevice;
use vellum_core::{CanvasSettings, CommandList, DebugLevel};
use vellum_infra::SoftwareDevice;

const SETTINGS_JSON: &str = r#"{ "default_dpi": 144.0, "debug_level": "warning" }"#;

fn record_scene(list: &CommandList) -> Result<()> {
    let mut session = list.create_drawing_session()?;
    session.clear(LinearRgba::TRANSPARENT)?;
    session.fill_rectangle(Rect::from_xywh(0.0, 0.0, 64.0, 32.0), LinearRgba::RED)?;
    session.draw_line(
        Vec2::new(0.0, 40.0),
        Vec2::new(64.0, 40.0),
        LinearRgba::BLUE,
        4.0,
    )?;
    log::info!("Recorded scene at {} dpi", session.dpi()?);
    session.close()?;
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings =
        CanvasSettings::from_json_str(SETTINGS_JSON).context("invalid recorder settings")?;
    if settings.reports(DebugLevel::Information) {
        log::info!("Settings: {:?}", settings);
    }
    let (native, device) = SoftwareDevice::create_canvas_device(settings);

    let scene = CommandList::create_new(&device)?;
    record_scene(&scene)?;
    let scene_bounds = scene.bounds(None)?;
    log::info!(
        "Scene bounds: {:?} ({} x {})",
        scene_bounds,
        scene_bounds.width(),
        scene_bounds.height()
    );

    let canvas = CommandList::create_new(&device)?;
    {
        let mut session = canvas.create_drawing_session()?;
        session.draw_image(&scene, Vec2::new(100.0, 0.0))?;
        session.set_transform(Matrix3x2::from_rotation(FRAC_PI_4))?;
        session.draw_image(&scene, Vec2::ZERO)?;
        session.close()?;
    }

    log::info!("Scene state after compositing: {:?}", scene.finalize_state());
    log::info!("Canvas bounds: {:?}", canvas.bounds(None)?);
    log::info!(
        "Canvas bounds scaled by 2: {:?}",
        canvas.bounds_with_transform(None, Matrix3x2::from_scale(Vec2::new(2.0, 2.0)))?
    );

    if let Err(e) = scene.create_drawing_session() {
        log::info!("Scene no longer accepts drawing: {}", e);
    }

    canvas.close();
    scene.close();
    device.close();
    log::info!(
        "Backend '{}' created {} recordings and {} device contexts",
        native.backend_name(),
        native.recordings_created(),
        native.contexts_created()
    );
    Ok(())
}
