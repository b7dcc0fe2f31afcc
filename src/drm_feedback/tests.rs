use {super::*, crate::format::{ARGB8888, XRGB8888}, crate::video::LINEAR_MODIFIER};

fn read_table(feedback: &DrmFeedback) -> Vec<(u32, u64)> {
    assert_eq!(feedback.size % 16, 0);
    let mut buf = vec![0u8; feedback.size];
    let mut pos = 0;
    while pos < buf.len() {
        let n = uapi::pread(feedback.fd.raw(), &mut buf[pos..], pos as _).unwrap().len();
        assert!(n > 0);
        pos += n;
    }
    buf.chunks(16)
        .map(|rec| {
            let format = u32::from_ne_bytes(rec[0..4].try_into().unwrap());
            let padding = u32::from_ne_bytes(rec[4..8].try_into().unwrap());
            assert_eq!(padding, 0);
            let modifier = u64::from_ne_bytes(rec[8..16].try_into().unwrap());
            (format, modifier)
        })
        .collect()
}

#[test]
fn format_table_layout() {
    let mut builder = DrmFeedbackBuilder::new(1);
    builder.add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    builder.add_format(XRGB8888.drm, 0x0100_0000_0000_0001).unwrap();
    let feedback = builder.build().unwrap();
    assert_eq!(feedback.size, 32);
    assert_eq!(
        read_table(&feedback),
        vec![
            (ARGB8888.drm, LINEAR_MODIFIER),
            (XRGB8888.drm, 0x0100_0000_0000_0001),
        ]
    );
}

#[test]
fn add_format_deduplicates() {
    let mut builder = DrmFeedbackBuilder::new(1);
    let a = builder.add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    let b = builder.add_format(XRGB8888.drm, LINEAR_MODIFIER).unwrap();
    let c = builder.add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    assert_eq!(a, 0);
    assert_eq!(b, 1);
    assert_eq!(c, 0);
    let feedback = builder.build().unwrap();
    assert_eq!(feedback.size, 32);
}

#[test]
fn tranches_commit_on_tranche_done() {
    let mut builder = DrmFeedbackBuilder::new(1);
    builder.start_tranche(1).unwrap();
    builder.tranche_add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    builder.tranche_add_format(XRGB8888.drm, LINEAR_MODIFIER).unwrap();
    builder.tranche_done().unwrap();
    builder.start_tranche(2).unwrap();
    builder.tranche_add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    builder.tranche_flags(SCANOUT).unwrap();
    builder.tranche_done().unwrap();
    let feedback = builder.build().unwrap();
    assert_eq!(feedback.tranches.len(), 2);
    assert_eq!(feedback.tranches[0].device, 1);
    assert_eq!(feedback.tranches[0].indices, vec![0, 1]);
    assert_eq!(feedback.tranches[0].flags, 0);
    assert_eq!(feedback.tranches[1].device, 2);
    assert_eq!(feedback.tranches[1].indices, vec![0]);
    assert_eq!(feedback.tranches[1].flags, SCANOUT);
}

#[test]
fn unfinished_tranche_is_rejected() {
    let mut builder = DrmFeedbackBuilder::new(1);
    builder.start_tranche(1).unwrap();
    assert!(matches!(
        builder.start_tranche(2),
        Err(DrmFeedbackError::UnfinishedTranche)
    ));
    assert!(matches!(
        builder.build(),
        Err(DrmFeedbackError::UnfinishedTranche)
    ));
}

#[test]
fn tranche_ops_require_a_tranche() {
    let mut builder = DrmFeedbackBuilder::new(1);
    assert!(matches!(
        builder.tranche_add_format(ARGB8888.drm, LINEAR_MODIFIER),
        Err(DrmFeedbackError::NoTranche)
    ));
    assert!(matches!(
        builder.tranche_flags(SCANOUT),
        Err(DrmFeedbackError::NoTranche)
    ));
    assert!(matches!(
        builder.tranche_done(),
        Err(DrmFeedbackError::NoTranche)
    ));
}

#[test]
fn empty_tranche_list_defaults_to_all_formats() {
    let mut builder = DrmFeedbackBuilder::new(7);
    builder.add_format(ARGB8888.drm, LINEAR_MODIFIER).unwrap();
    builder.add_format(XRGB8888.drm, LINEAR_MODIFIER).unwrap();
    let feedback = builder.build().unwrap();
    assert_eq!(feedback.main_device, 7);
    assert_eq!(feedback.tranches.len(), 1);
    assert_eq!(feedback.tranches[0].device, 7);
    assert_eq!(feedback.tranches[0].indices, vec![0, 1]);
}

#[test]
fn format_table_is_sealed() {
    let builder = DrmFeedbackBuilder::new(1);
    let feedback = builder.build().unwrap();
    let seals = uapi::fcntl_get_seals(feedback.fd.raw()).unwrap();
    assert!(seals & uapi::c::F_SEAL_WRITE != 0);
    assert!(seals & uapi::c::F_SEAL_SHRINK != 0);
}
