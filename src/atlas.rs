//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Texture lookup consumed by image widgets and layers.
use super::*;

#[derive(Copy, Clone, Debug)]
/// Region of a texture atlas.
pub struct TextureRegion {
    /// Texture target.
    pub target: u32,
    /// Texture id.
    pub id: u32,
    /// Normalized texture coordinates `(u0, v0, u1, v1)`, bottom-left to top-right.
    pub uv: [Real; 4],
    /// Size of the region in pixels.
    pub pixel_size: Vec2f,
}

impl TextureRegion {
    /// Texture coordinate at the fractional position `(fx, fy)` of the region.
    pub fn lerp(&self, fx: Real, fy: Real) -> Vec2f {
        let [u0, v0, u1, v1] = self.uv;
        vec2f(u0 + (u1 - u0) * fx, v0 + (v1 - v0) * fy)
    }

    /// Texture coordinates of the whole region, in quad corner order.
    pub fn quad(&self) -> [Vec2f; 4] { self.sub_quad(0.0, 0.0, 1.0, 1.0) }

    /// Texture coordinates of the sub-rectangle `(fx0, fy0)..(fx1, fy1)`, in quad corner order.
    pub fn sub_quad(&self, fx0: Real, fy0: Real, fx1: Real, fy1: Real) -> [Vec2f; 4] {
        [self.lerp(fx0, fy0), self.lerp(fx1, fy0), self.lerp(fx1, fy1), self.lerp(fx0, fy1)]
    }

    /// Group state binding this texture.
    pub fn group_kind(&self) -> GroupKind { GroupKind::Texture { target: self.target, id: self.id } }
}

/// Resource collaborator resolving named textures.
pub trait Resources {
    /// Looks up the texture `name` in `category`.
    fn texture(&self, name: &str, category: &str) -> Result<TextureRegion>;
    /// Pixel dimensions of the atlas texture `id`.
    fn atlas_size(&self, id: u32) -> Option<Dimensioni>;
}

/// Texture target used by [`TextureAtlas`] (`GL_TEXTURE_2D`).
pub const TEXTURE_2D: u32 = 0x0DE1;

struct AtlasPage {
    width: i32,
    height: i32,
}

#[derive(Default)]
struct Atlas {
    pages: Vec<AtlasPage>,
    entries: HashMap<(String, String), (u32, Recti)>,
}

#[derive(Clone, Default)]
/// Shared in-memory table of atlas pages and the named regions packed into them.
pub struct TextureAtlas(Rc<RefCell<Atlas>>);

impl TextureAtlas {
    /// Creates an empty atlas table.
    pub fn new() -> Self { Self::default() }

    /// Registers an atlas page of `width`x`height` pixels and returns its texture id.
    pub fn add_page(&self, width: i32, height: i32) -> u32 {
        let mut atlas = self.0.borrow_mut();
        atlas.pages.push(AtlasPage { width, height });
        atlas.pages.len() as u32
    }

    /// Registers the region `rect` of page `id` under `name`/`category`.
    pub fn add_texture(&self, id: u32, name: &str, category: &str, rect: Recti) {
        self.0.borrow_mut().entries.insert((category.to_string(), name.to_string()), (id, rect));
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize { self.0.borrow().entries.len() }

    /// Returns `true` if no texture is registered.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Resources for TextureAtlas {
    fn texture(&self, name: &str, category: &str) -> Result<TextureRegion> {
        let atlas = self.0.borrow();
        let not_found = || GuiError::TextureNotFound { name: name.to_string(), category: category.to_string() };
        let (id, rect) = *atlas.entries.get(&(category.to_string(), name.to_string())).ok_or_else(not_found)?;
        let page = (id as usize).checked_sub(1).and_then(|i| atlas.pages.get(i)).ok_or_else(not_found)?;
        let w = page.width.max(1) as Real;
        let h = page.height.max(1) as Real;
        let x = rect.x as Real / w;
        let y = rect.y as Real / h;
        let uw = rect.width as Real / w;
        let uh = rect.height as Real / h;
        Ok(TextureRegion {
            target: TEXTURE_2D,
            id,
            uv: [x, y, x + uw, y + uh],
            pixel_size: vec2f(rect.width as Real, rect.height as Real),
        })
    }

    fn atlas_size(&self, id: u32) -> Option<Dimensioni> {
        let atlas = self.0.borrow();
        let page = atlas.pages.get((id as usize).checked_sub(1)?)?;
        Some(Dimensioni::new(page.width, page.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_coordinates_are_normalized() {
        let atlas = TextureAtlas::new();
        let page = atlas.add_page(256, 128);
        atlas.add_texture(page, "ok", "gui", Recti::new(64, 32, 64, 32));
        let region = atlas.texture("ok", "gui").unwrap();
        assert_eq!(region.id, page);
        assert_eq!(region.uv, [0.25, 0.25, 0.5, 0.5]);
        assert_eq!(region.pixel_size.x, 64.0);
        let mid = region.lerp(0.5, 0.5);
        assert_eq!(mid.x, 0.375);
        assert_eq!(mid.y, 0.375);
        let size = atlas.atlas_size(page).unwrap();
        assert_eq!(size.width, 256);
        assert_eq!(size.height, 128);
    }

    #[test]
    fn missing_texture_is_reported() {
        let atlas = TextureAtlas::new();
        let err = atlas.texture("nope", "gui").unwrap_err();
        assert_eq!(err, GuiError::TextureNotFound { name: "nope".into(), category: "gui".into() });
        assert!(atlas.atlas_size(0).is_none());
    }
}
