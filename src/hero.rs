pub const HERO_INDICATORS: usize = 8;
pub const HERO_THUMBNAILS: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct HeroCarousel {
    len: usize,
    index: usize,
    pending: Option<usize>,
}

impl HeroCarousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            pending: None,
        }
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.pending = None;
        if self.index >= len {
            self.index = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_fading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn rotates(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> bool {
        if !self.rotates() {
            return false;
        }
        let from = self.pending.unwrap_or(self.index);
        self.pending = Some((from + 1) % self.len);
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.rotates() {
            return false;
        }
        let from = self.pending.unwrap_or(self.index);
        self.pending = Some((from + self.len - 1) % self.len);
        true
    }

    pub fn jump(&mut self, target: usize) -> bool {
        if target >= self.len.min(HERO_INDICATORS) {
            return false;
        }
        self.pending = Some(target);
        true
    }

    pub fn settle(&mut self) -> bool {
        match self.pending.take() {
            Some(target) if target != self.index => {
                self.index = target;
                true
            }
            _ => false,
        }
    }
}
