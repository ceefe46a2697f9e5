/// Largest byte size of one chunk's value buffer.
///
/// Chunks are addressed with 32-bit offsets, so a single block never exceeds
/// `i32::MAX` bytes even though logical row indices are 64-bit.
pub const MAX_CHUNK_BYTES: usize = i32::MAX as usize;

/// Process-wide `MaxChunkCapacity` for element type `T`, in elements.
pub const fn max_chunk_capacity<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if size == 0 {
        MAX_CHUNK_BYTES
    } else {
        MAX_CHUNK_BYTES / size
    }
}
