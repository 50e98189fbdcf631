/// A card corner after rotation and projection, with its texture coordinate
pub struct Vertex {
    pub screen_position: [f64; 2],
    pub uv: [f64; 2],
}
