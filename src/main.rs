use rastrum::prelude::*;
use sdl2::keyboard::Keycode;

/// Loads the mesh and texture named on the command line, falling back to the
/// built-in cube and a checkerboard.
fn load_assets(config: &RenderConfig) -> Result<(Mesh, Texture), LoadError> {
    let mut args = std::env::args().skip(1);

    let mesh = match args.next() {
        Some(path) => Mesh::from_obj(path, config.base_color)?,
        None => Mesh::cube(),
    };
    let texture = match args.next() {
        Some(path) => Texture::from_file(path)?,
        None => Texture::checkerboard(64, 64, colors::LILAC, colors::BLUE),
    };
    Ok((mesh, texture))
}

fn main() -> Result<(), String> {
    env_logger::init();

    let config = RenderConfig::default();
    let (mut mesh, texture) = load_assets(&config).map_err(|e| e.to_string())?;

    let mut window = Window::new("Rastrum", config.width, config.height)?;
    let mut renderer = Renderer::new(window.width(), window.height());
    let mut engine = Engine::new(config);
    let mut limiter = FrameLimiter::new(&window, config.target_fps);

    let mut grid_spacing = config.grid_spacing;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                renderer.resize(w, h);
                let mut projection = engine.projection();
                projection.set_inv_aspect_ratio(Viewport::new(w, h).inv_aspect_ratio());
                engine.set_projection(projection);
            }
            WindowEvent::KeyDown(key) => match key {
                Keycode::Num1 => engine.set_render_mode(RenderMode::Filled),
                Keycode::Num2 => engine.set_render_mode(RenderMode::Textured),
                Keycode::Num3 => engine.set_render_mode(RenderMode::Wireframe),
                Keycode::Num4 => engine.set_render_mode(RenderMode::TexturedWireframe),
                Keycode::G => grid_spacing = if grid_spacing > 0 { 0 } else { 50 },
                _ => {}
            },
            WindowEvent::None => {}
        }

        limiter.wait_and_get_delta(&window);

        renderer.clear(config.background);
        if grid_spacing > 0 {
            renderer.draw_grid(grid_spacing, colors::GRID);
        }
        {
            let mut buffer = renderer.as_framebuffer().map_err(|e| e.to_string())?;
            engine.render_frame(&mut mesh, &texture, config.rotation_angles(), &mut buffer);
        }

        window.present(renderer.as_bytes(), renderer.stride())?;
    }

    Ok(())
}
