/// Per pixel permission to take part in a band.
///
/// Pixels the mask rejects are never selected, they are copied verbatim and
/// split the bands around them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    allowed: Vec<bool>,
}

impl Mask {
    /// A mask allowing every pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            allowed: vec![true; width as usize * height as usize],
        }
    }

    /// Returns `None` if `allowed` does not hold `width * height` entries.
    pub fn from_vec(width: u32, height: u32, allowed: Vec<bool>) -> Option<Self> {
        if allowed.len() == width as usize * height as usize {
            Some(Mask {
                width,
                height,
                allowed,
            })
        } else {
            None
        }
    }

    /// White pixels may be sorted, black pixels may not.
    pub fn from_gray(gray: &image::GrayImage) -> Self {
        Mask {
            width: gray.width(),
            height: gray.height(),
            allowed: gray.pixels().map(|pixel| pixel.0[0] >= 128).collect(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn allows(&self, index: usize) -> bool {
        self.allowed[index]
    }

    pub fn forbid(&mut self, x: u32, y: u32) {
        let index = y as usize * self.width as usize + x as usize;
        self.allowed[index] = false;
    }

    /// Keeps only the pixels both masks allow.
    pub fn intersect(&mut self, other: &Mask) {
        for (mine, theirs) in self.allowed.iter_mut().zip(&other.allowed) {
            *mine &= *theirs;
        }
    }
}

/// Forbids every pixel lying on a Canny edge of `image`, so bands stop at
/// edges.
#[cfg(feature = "imageproc")]
pub fn edges_canny<P, I>(image: &I, low_thresh: f32, high_thresh: f32) -> Mask
where
    P: image::Pixel<Subpixel = u8> + 'static,
    I: image::GenericImageView<Pixel = P>,
{
    let gray = image::imageops::colorops::grayscale(image);
    let edges = imageproc::edges::canny(&gray, low_thresh, high_thresh);
    let mut mask = Mask::new(image.width(), image.height());
    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel.0[0] == 255 {
            mask.forbid(x, y);
        }
    }
    log::debug!(
        "edges_canny: {} of {} pixels on edges",
        mask.allowed.iter().filter(|allowed| !**allowed).count(),
        mask.allowed.len()
    );
    mask
}
