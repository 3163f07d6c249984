//! OpenGL canvas
//!
//! Drawing calls are batched into one vertex buffer per primitive kind. The
//! batch is submitted whenever the primitive kind changes, so draw order is
//! kept. Vertices stay in world coordinates; the vertex shader maps the
//! window's viewport onto clip space.

use std::ffi::CString;
use std::ptr;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::draw::Canvas;
use crate::geometry::{Color, Point};
use crate::window::Viewport;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 3],
}

// Plain `#[repr(C)]` floats without padding
unsafe impl bytemuck::Zeroable for Vertex {}
unsafe impl bytemuck::Pod for Vertex {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primitive {
    Points,
    Lines,
    Triangles,
}

impl Primitive {
    fn gl_mode(self) -> u32 {
        match self {
            Primitive::Points => gl::POINTS,
            Primitive::Lines => gl::LINES,
            Primitive::Triangles => gl::TRIANGLES,
        }
    }
}

const VERTEX_SHADER: &str = r#"
    #version 330 core
    layout (location = 0) in vec2 aPos;
    layout (location = 1) in vec3 aColor;

    uniform vec2 uMin;
    uniform vec2 uMax;

    out vec3 vColor;

    void main() {
        vec2 ndc = (aPos - uMin) / (uMax - uMin) * 2.0 - 1.0;
        gl_Position = vec4(ndc, 0.0, 1.0);
        vColor = aColor;
    }
"#;

const FRAGMENT_SHADER: &str = r#"
    #version 330 core
    in vec3 vColor;
    out vec4 FragColor;

    void main() {
        FragColor = vec4(vColor, 1.0);
    }
"#;

/// Canvas backed by the current GL context
pub struct GlCanvas {
    program: u32,
    vao: u32,
    vbo: u32,
    u_min: i32,
    u_max: i32,
    color: Color,
    primitive: Primitive,
    batch: Vec<Vertex>,
}

impl GlCanvas {
    /// Needs a current GL context
    pub fn new() -> Result<Self> {
        unsafe {
            let program = create_shader_program()?;

            let mut vao = 0;
            let mut vbo = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            let stride = std::mem::size_of::<Vertex>() as i32;
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, ptr::null());
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (2 * std::mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            gl::BindVertexArray(0);

            let u_min = uniform_location(program, "uMin")?;
            let u_max = uniform_location(program, "uMax")?;

            info!("OpenGL canvas initialized");

            Ok(Self {
                program,
                vao,
                vbo,
                u_min,
                u_max,
                color: Color::BLACK,
                primitive: Primitive::Triangles,
                batch: Vec::new(),
            })
        }
    }

    /// Start a frame on a `width` x `height` surface showing `viewport`
    pub fn begin(&mut self, width: i32, height: i32, viewport: &Viewport) {
        self.batch.clear();
        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::UseProgram(self.program);
            gl::Uniform2f(self.u_min, viewport.min_x as f32, viewport.min_y as f32);
            gl::Uniform2f(self.u_max, viewport.max_x as f32, viewport.max_y as f32);
        }
    }

    /// Submit whatever is still batched
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let data: &[u8] = bytemuck::cast_slice(&self.batch);
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as isize,
                data.as_ptr() as *const _,
                gl::STREAM_DRAW,
            );
            gl::DrawArrays(self.primitive.gl_mode(), 0, self.batch.len() as i32);
            gl::BindVertexArray(0);
        }
        self.batch.clear();
    }

    fn push(&mut self, primitive: Primitive, points: &[Point]) {
        if primitive != self.primitive {
            self.flush();
            self.primitive = primitive;
        }
        let color = self.color.to_f32();
        self.batch.extend(points.iter().map(|p| Vertex {
            pos: [p.x as f32, p.y as f32],
            color,
        }));
    }
}

impl Drop for GlCanvas {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
    }
}

impl Canvas for GlCanvas {
    fn clear(&mut self, color: Color) {
        self.flush();
        unsafe {
            let [r, g, b] = color.to_f32();
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_point(&mut self, x: f64, y: f64) {
        self.push(Primitive::Points, &[Point::new(x, y)]);
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.push(Primitive::Lines, &[Point::new(x0, y0), Point::new(x1, y1)]);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        self.push(Primitive::Triangles, &[a, b, c]);
    }
}

fn uniform_location(program: u32, name: &str) -> Result<i32> {
    let c_name = CString::new(name)?;
    let location = unsafe { gl::GetUniformLocation(program, c_name.as_ptr()) };
    if location < 0 {
        return Err(anyhow!("Uniform {} not found", name));
    }
    Ok(location)
}

fn create_shader_program() -> Result<u32> {
    unsafe {
        let vs = compile_shader(VERTEX_SHADER, gl::VERTEX_SHADER)?;
        let fs = match compile_shader(FRAGMENT_SHADER, gl::FRAGMENT_SHADER) {
            Ok(fs) => fs,
            Err(e) => {
                gl::DeleteShader(vs);
                return Err(e);
            }
        };
        let program = link_program(vs, fs);

        gl::DeleteShader(vs);
        gl::DeleteShader(fs);

        debug!("Canvas shader program linked");
        program
    }
}

fn compile_shader(source: &str, shader_type: u32) -> Result<u32> {
    let c_str = CString::new(source)?;
    unsafe {
        let shader = gl::CreateShader(shader_type);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut success = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        if success == 0 {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(0) as usize];
            gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buffer.as_mut_ptr() as *mut _);
            let error = String::from_utf8_lossy(&buffer);
            gl::DeleteShader(shader);
            return Err(anyhow!("Shader compilation failed: {}", error));
        }

        Ok(shader)
    }
}

fn link_program(vs: u32, fs: u32) -> Result<u32> {
    unsafe {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vs);
        gl::AttachShader(program, fs);
        gl::LinkProgram(program);

        let mut success = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        if success == 0 {
            let mut len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(0) as usize];
            gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer.as_mut_ptr() as *mut _);
            let error = String::from_utf8_lossy(&buffer);
            gl::DeleteProgram(program);
            return Err(anyhow!("Program linking failed: {}", error));
        }

        Ok(program)
    }
}
