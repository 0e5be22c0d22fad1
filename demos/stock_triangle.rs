// Draws a vertex-colored triangle with the untextured stock program.
// Run with `cargo run --example stock_triangle --features sdl2`.

use std::mem;

use gl_stock_shaders::{
    gl, gl::types::*, sdl2, ElementSize, ShaderConfig, StockShader, VertexDefinition,
    VertexElement, VertexSource, VertexType,
};
use sdl2::{event::Event, video::GLProfile};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 600;

#[repr(C)]
struct Vertex {
    position: [f32; 3],
    color: [u8; 4],
}

static VERTICES: [Vertex; 3] = [
    Vertex { position: [0.0, 0.5, 0.0], color: [255, 0, 0, 255] },
    Vertex { position: [0.5, -0.5, 0.0], color: [0, 255, 0, 255] },
    Vertex { position: [-0.5, -0.5, 0.0], color: [0, 0, 255, 255] },
];

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_version(3, 2);
    gl_attr.set_double_buffer(true);

    let window = video_subsystem
        .window("Demo: stock shaders", SCREEN_WIDTH, SCREEN_HEIGHT)
        .opengl()
        .build()?;

    // Create a window context
    let _ctx = window.gl_create_context()?;
    let mut shaders = gl_stock_shaders::with_sdl2(&video_subsystem, ShaderConfig::default())?;
    let program = shaders
        .stock_program(StockShader::BasicNoTex)
        .ok_or("stock program unavailable")?;

    let layout = VertexDefinition::new(mem::size_of::<Vertex>())
        .with(VertexElement::new(VertexType::Position, ElementSize::Float, 3, 0))
        .with(VertexElement::new(VertexType::Color, ElementSize::UnsignedByte, 4, 12));

    let mut vao = 0;
    let mut vbo = 0;
    unsafe {
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);
        gl::GenBuffers(1, &mut vbo);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            mem::size_of_val(&VERTICES) as GLsizeiptr,
            VERTICES.as_ptr() as *const GLvoid,
            gl::STATIC_DRAW,
        );
    }

    let mut event_pump = sdl_context.event_pump()?;
    'running: loop {
        for event in event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'running;
            }
        }

        unsafe {
            gl::ClearColor(0.3, 0.6, 0.3, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        shaders.set_matrices(program, &IDENTITY, &IDENTITY)?;
        shaders.apply_program(program, VertexSource::Buffer, Some(&layout), 0)?;
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, VERTICES.len() as GLsizei);
        }
        shaders.clear_program(program, Some(&layout))?;

        window.gl_swap_window();
        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    unsafe {
        gl::DeleteBuffers(1, &vbo);
        gl::DeleteVertexArrays(1, &vao);
    }
    shaders.cleanup();
    Ok(())
}
