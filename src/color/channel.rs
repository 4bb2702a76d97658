#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: &[Channel] = &[Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
            Channel::Alpha => "A",
        }
    }

    /// Sample index within an RGBA pixel (0=R, 1=G, 2=B, 3=A).
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// Opaque pixel carrying `value` in this channel and zero elsewhere.
    pub fn isolate(self, value: u8) -> [u8; 4] {
        let mut rgba = [0, 0, 0, 255];
        rgba[self.index()] = value;
        rgba
    }
}
