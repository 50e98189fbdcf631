mod gesture;
mod graphics;
mod loader;
mod math;
mod renderer;
mod rotation;
mod sampler;
mod state;
mod vertex;
mod widget;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use druid::widget::{Flex, Label, Slider};
use druid::{AppLauncher, LocalizedString, PlatformError, Widget, WidgetExt, WindowDesc};

use rotation::{Face, RotationState};
use state::AppState;
use widget::CardWidget;

const WINDOW_WIDTH: f64 = 400.0;
const WINDOW_HEIGHT: f64 = 460.0;

/// A 3D card flip demo: the card spins on its own, dragging around the
/// center spins it in-plane, and the slider washes the colors out.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image shown on the front face
    #[arg(long)]
    front: Option<PathBuf>,

    /// Image shown on the back face
    #[arg(long)]
    back: Option<PathBuf>,

    /// Milliseconds per full revolution of the idle spin
    #[arg(long, default_value_t = 3000)]
    spin_duration: u64,

    /// Initial rotation about the flip axis, in degrees
    #[arg(long, default_value_t = 0)]
    initial_y_rotation: i32,

    /// Initial in-plane rotation, in degrees
    #[arg(long, default_value_t = 0)]
    initial_z_rotation: i32,

    /// Start with the debug overlay enabled
    #[arg(long)]
    debug: bool,
}

fn build_ui(spin_duration: Duration) -> impl Widget<AppState> {
    Flex::column()
        .with_flex_child(CardWidget::new(spin_duration), 1.0)
        .with_child(
            Flex::row()
                .with_child(Label::new("Saturation"))
                .with_flex_child(
                    Slider::new()
                        .with_range(0.0, 1.0)
                        .lens(AppState::saturation)
                        .expand_width(),
                    1.0,
                )
                .padding(8.0),
        )
}

/// Main function
pub fn main() -> Result<(), PlatformError> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let spin_duration = Duration::from_millis(args.spin_duration.max(1));

    let main_window = WindowDesc::new(build_ui(spin_duration))
        .title(LocalizedString::new("3D Card Flip"))
        .window_size((WINDOW_WIDTH, WINDOW_HEIGHT));

    let initial_state = AppState::new(
        RotationState::new(args.initial_y_rotation, args.initial_z_rotation),
        args.debug,
    );

    let launcher = AppLauncher::with_window(main_window);

    // Fire-and-forget loads; the card shows flat placeholders until each
    // image arrives.
    let sink = launcher.get_external_handle();
    let target = (WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32);
    if let Some(path) = args.front {
        loader::spawn_load(sink.clone(), Face::Front, path, target.0, target.1);
    }
    if let Some(path) = args.back {
        loader::spawn_load(sink, Face::Back, path, target.0, target.1);
    }

    launcher.launch(initial_state)?;

    Ok(())
}
