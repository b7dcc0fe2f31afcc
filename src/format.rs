use {ahash::AHashMap, std::sync::LazyLock};

/// Extra information for formats that shm buffers may use.
#[derive(Copy, Clone, Debug)]
pub struct FormatShmInfo {
    pub bpp: u32,
}

/// A pixel format known to the compositor, identified by its DRM fourcc.
#[derive(Copy, Clone, Debug)]
pub struct Format {
    pub name: &'static str,
    pub drm: u32,
    pub wl_id: Option<u32>,
    pub has_alpha: bool,
    pub shm_info: Option<FormatShmInfo>,
    pub opaque: Option<&'static Format>,
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.drm == other.drm
    }
}

impl Eq for Format {}

const fn fourcc_code(a: char, b: char, c: char, d: char) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

static FORMATS_MAP: LazyLock<AHashMap<u32, &'static Format>> = LazyLock::new(|| {
    let mut map = AHashMap::new();
    for format in FORMATS {
        assert!(map.insert(format.drm, *format).is_none());
    }
    map
});

pub fn formats() -> &'static AHashMap<u32, &'static Format> {
    &FORMATS_MAP
}

pub fn format_from_drm(drm: u32) -> Option<&'static Format> {
    FORMATS_MAP.get(&drm).copied()
}

const RGBA_SHM: Option<FormatShmInfo> = Some(FormatShmInfo { bpp: 4 });

pub const ARGB8888: &Format = &Format {
    name: "argb8888",
    drm: fourcc_code('A', 'R', '2', '4'),
    wl_id: Some(0),
    has_alpha: true,
    shm_info: RGBA_SHM,
    opaque: Some(XRGB8888),
};

pub const XRGB8888: &Format = &Format {
    name: "xrgb8888",
    drm: fourcc_code('X', 'R', '2', '4'),
    wl_id: Some(1),
    has_alpha: false,
    shm_info: RGBA_SHM,
    opaque: None,
};

pub const ABGR8888: &Format = &Format {
    name: "abgr8888",
    drm: fourcc_code('A', 'B', '2', '4'),
    wl_id: None,
    has_alpha: true,
    shm_info: RGBA_SHM,
    opaque: Some(XBGR8888),
};

pub const XBGR8888: &Format = &Format {
    name: "xbgr8888",
    drm: fourcc_code('X', 'B', '2', '4'),
    wl_id: None,
    has_alpha: false,
    shm_info: RGBA_SHM,
    opaque: None,
};

pub const R8: &Format = &Format {
    name: "r8",
    drm: fourcc_code('R', '8', ' ', ' '),
    wl_id: None,
    has_alpha: false,
    shm_info: Some(FormatShmInfo { bpp: 1 }),
    opaque: None,
};

pub const RGB565: &Format = &Format {
    name: "rgb565",
    drm: fourcc_code('R', 'G', '1', '6'),
    wl_id: None,
    has_alpha: false,
    shm_info: Some(FormatShmInfo { bpp: 2 }),
    opaque: None,
};

pub const ARGB2101010: &Format = &Format {
    name: "argb2101010",
    drm: fourcc_code('A', 'R', '3', '0'),
    wl_id: None,
    has_alpha: true,
    shm_info: RGBA_SHM,
    opaque: Some(XRGB2101010),
};

pub const XRGB2101010: &Format = &Format {
    name: "xrgb2101010",
    drm: fourcc_code('X', 'R', '3', '0'),
    wl_id: None,
    has_alpha: false,
    shm_info: RGBA_SHM,
    opaque: None,
};

pub const ABGR2101010: &Format = &Format {
    name: "abgr2101010",
    drm: fourcc_code('A', 'B', '3', '0'),
    wl_id: None,
    has_alpha: true,
    shm_info: RGBA_SHM,
    opaque: Some(XBGR2101010),
};

pub const XBGR2101010: &Format = &Format {
    name: "xbgr2101010",
    drm: fourcc_code('X', 'B', '3', '0'),
    wl_id: None,
    has_alpha: false,
    shm_info: RGBA_SHM,
    opaque: None,
};

pub const ABGR16161616F: &Format = &Format {
    name: "abgr16161616f",
    drm: fourcc_code('A', 'B', '4', 'H'),
    wl_id: None,
    has_alpha: true,
    shm_info: Some(FormatShmInfo { bpp: 8 }),
    opaque: Some(XBGR16161616F),
};

pub const XBGR16161616F: &Format = &Format {
    name: "xbgr16161616f",
    drm: fourcc_code('X', 'B', '4', 'H'),
    wl_id: None,
    has_alpha: false,
    shm_info: Some(FormatShmInfo { bpp: 8 }),
    opaque: None,
};

pub const NV12: &Format = &Format {
    name: "nv12",
    drm: fourcc_code('N', 'V', '1', '2'),
    wl_id: None,
    has_alpha: false,
    shm_info: None,
    opaque: None,
};

static FORMATS: &[&Format] = &[
    NV12,
    ARGB8888,
    XRGB8888,
    ABGR8888,
    XBGR8888,
    R8,
    RGB565,
    ARGB2101010,
    XRGB2101010,
    ABGR2101010,
    XBGR2101010,
    ABGR16161616F,
    XBGR16161616F,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dont_panic() {
        formats();
    }

    #[test]
    fn fourcc() {
        assert_eq!(ARGB8888.drm, 0x34325241);
        assert_eq!(XRGB8888.drm, 0x34325258);
    }

    #[test]
    fn opaque_variants_drop_alpha() {
        for format in FORMATS {
            if let Some(opaque) = format.opaque {
                assert!(format.has_alpha);
                assert!(!opaque.has_alpha);
            }
        }
    }
}
