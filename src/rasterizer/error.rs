//! Contract violations reported by the renderer

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid texture {0}")]
    InvalidTexture(u16),

    #[error("texture capacity of {0} reached")]
    TexturesFull(usize),

    #[error("invalid texture reset len {len} > {current}")]
    InvalidReset { len: usize, current: usize },

    #[error("frame buffer of {len} pixels cannot hold {width}x{height} with stride {stride}")]
    BufferTooSmall {
        len: usize,
        width: i32,
        height: i32,
        stride: usize,
    },
}
