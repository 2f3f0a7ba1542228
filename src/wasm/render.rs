use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{Error, Result};
use crate::field::{Particle, ParticleField};
use crate::scene::{FrameUniforms, Scene};

fn unavailable(what: &str) -> impl Fn(JsValue) -> Error + '_ {
    move |err| Error::ResourceUnavailable(format!("{what}: {err:?}"))
}

struct Uniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            model_view: gl.get_uniform_location(program, "uModelView"),
            projection: gl.get_uniform_location(program, "uProjection"),
            time: gl.get_uniform_location(program, "uTime"),
            point_size: gl.get_uniform_location(program, "uPointSize"),
            color: gl.get_uniform_location(program, "uColor"),
        }
    }
}

/// WebGL2 state for the point cloud: one program, one interleaved buffer.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    _buffer: WebGlBuffer,
    uniforms: Uniforms,
    count: i32,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, scene: &Scene) -> Result<Self> {
        let attrs = js_sys::Object::new();
        js_sys::Reflect::set(&attrs, &"antialias".into(), &JsValue::TRUE)
            .map_err(unavailable("context attributes"))?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &attrs)
            .map_err(unavailable("webgl2 context"))?
            .ok_or_else(|| Error::ResourceUnavailable("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| Error::ResourceUnavailable("context is not WebGL2".into()))?;

        let stages = scene.program();
        let vs = compile_shader(&gl, GL::VERTEX_SHADER, "vertex", stages.vertex.source)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, "fragment", stages.fragment.source())?;
        let program = link_program(&gl, &vs, &fs)?;
        let uniforms = Uniforms::locate(&gl, &program);

        let (vao, buffer) = upload_field(&gl, scene.field())?;

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        gl.enable(GL::DEPTH_TEST);

        let renderer = Self {
            gl,
            canvas,
            program,
            vao,
            _buffer: buffer,
            uniforms,
            count: scene.field().len() as i32,
        };
        let (w, h) = scene.viewport().state().buffer_size();
        renderer.resize(w, h);
        log::info!("renderer ready: {} particles", renderer.count);
        Ok(renderer)
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn draw(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        let [r, g, b] = frame.background;
        gl.clear_color(r, g, b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model_view.as_ref(),
            false,
            &frame.model_view.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.projection.as_ref(),
            false,
            &frame.projection.to_cols_array(),
        );
        gl.uniform1f(self.uniforms.time.as_ref(), frame.time);
        gl.uniform1f(self.uniforms.point_size.as_ref(), frame.point_size);
        gl.uniform4fv_with_f32_array(self.uniforms.color.as_ref(), &frame.color);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::POINTS, 0, self.count);
        gl.bind_vertex_array(None);
    }
}

fn compile_shader(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| Error::ResourceUnavailable(format!("cannot create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        log::error!("{stage} shader failed to compile: {log}");
        gl.delete_shader(Some(&shader));
        Err(Error::Shader { stage, log })
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| Error::ResourceUnavailable("cannot create program".into()))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        log::error!("program failed to link: {log}");
        Err(Error::Shader { stage: "link", log })
    }
}

fn upload_field(gl: &GL, field: &ParticleField) -> Result<(WebGlVertexArrayObject, WebGlBuffer)> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| Error::ResourceUnavailable("cannot create vertex array".into()))?;
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| Error::ResourceUnavailable("cannot create buffer".into()))?;

    gl.bind_vertex_array(Some(&vao));
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, field.as_bytes(), GL::STATIC_DRAW);

    // location 0: position, location 1: scale
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, Particle::STRIDE, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_with_i32(1, 1, GL::FLOAT, false, Particle::STRIDE, Particle::SCALE_OFFSET);

    gl.bind_vertex_array(None);
    gl.bind_buffer(GL::ARRAY_BUFFER, None);
    Ok((vao, buffer))
}

/// Scene plus the GPU objects drawing it, shared by the frame loop and the
/// event handlers.
pub struct Stage {
    pub scene: Scene,
    pub renderer: Renderer,
}

/// Start the frame loop. Each animation frame advances time by one step,
/// schedules the next frame and draws once. Runs until the page unloads.
pub fn start(stage: Rc<RefCell<Stage>>) -> std::result::Result<(), JsValue> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut stage = stage.borrow_mut();
        let frame = stage.scene.advance();

        // schedule next
        if let (Some(win), Some(cb)) = (window(), f.borrow().as_ref()) {
            if let Err(err) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }

        stage.renderer.draw(&frame);
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    let cb = first.as_ref().ok_or("frame closure missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(cb.as_ref().unchecked_ref())?;

    Ok(())
}
