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
/// Single-line edit buffer with a byte cursor kept on character boundaries.
#[derive(Clone, Debug, Default)]
pub(crate) struct EditBuffer {
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn new(text: &str) -> Self { Self { text: text.to_string(), cursor: text.len() } }

    pub fn insert(&mut self, s: &str) -> bool {
        let s: String = s.chars().filter(|c| !c.is_control()).collect();
        if s.is_empty() {
            return false;
        }
        let at = self.cursor.min(self.text.len());
        self.text.insert_str(at, &s);
        self.cursor = at + s.len();
        true
    }

    pub fn delete_prev(&mut self) -> bool {
        if self.cursor == 0 || self.text.is_empty() {
            return false;
        }
        let start = self.prev_boundary();
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn delete_next(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = self.next_boundary();
        self.text.replace_range(self.cursor..end, "");
        true
    }

    pub fn move_left(&mut self) -> bool {
        let to = self.prev_boundary();
        std::mem::replace(&mut self.cursor, to) != to
    }

    pub fn move_right(&mut self) -> bool {
        let to = self.next_boundary();
        std::mem::replace(&mut self.cursor, to) != to
    }

    pub fn home(&mut self) -> bool { std::mem::replace(&mut self.cursor, 0) != 0 }

    pub fn end(&mut self) -> bool {
        let len = self.text.len();
        std::mem::replace(&mut self.cursor, len) != len
    }

    fn prev_boundary(&self) -> usize {
        let mut at = self.cursor.min(self.text.len());
        if at == 0 {
            return 0;
        }
        at -= 1;
        while at > 0 && !self.text.is_char_boundary(at) {
            at -= 1;
        }
        at
    }

    fn next_boundary(&self) -> usize {
        let len = self.text.len();
        if self.cursor >= len {
            return len;
        }
        let mut at = self.cursor + 1;
        while at < len && !self.text.is_char_boundary(at) {
            at += 1;
        }
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_char_boundaries() {
        let mut b = EditBuffer::new("né");
        assert!(b.delete_prev());
        assert_eq!(b.text, "n");
        assert!(b.insert("ö!"));
        assert!(b.move_left());
        assert!(b.move_left());
        assert_eq!(b.cursor, 1);
        assert!(b.delete_next());
        assert_eq!(b.text, "n!");
    }

    #[test]
    fn control_characters_are_dropped() {
        let mut b = EditBuffer::default();
        assert!(!b.insert("\r\n"));
        assert!(b.insert("a\tb"));
        assert_eq!(b.text, "ab");
        assert!(b.home());
        assert!(!b.home());
        assert!(!b.delete_prev());
        assert!(b.end());
        assert!(!b.delete_next());
    }
}
