use std::ffi::CStr;
use std::os::raw::c_char;

use serde::de::DeserializeOwned;

use crate::backend::{AnalysisKind, VisionError};
use crate::input::ImageInput;

extern "C" {
    fn photolens_vision_analyze(
        kind: i32,
        pixels: *const u8,
        width: u32,
        height: u32,
        out_data: *mut *mut u8,
        out_len: *mut u64,
        out_error: *mut *mut c_char,
    ) -> i32;

    fn photolens_vision_free_data(ptr: *mut u8, len: u64);
    fn photolens_vision_free_error(ptr: *mut c_char);
}

/// Request selector understood by the Swift bridge.
fn request_kind(kind: AnalysisKind) -> i32 {
    match kind {
        AnalysisKind::Text => 0,
        AnalysisKind::Faces => 1,
        AnalysisKind::HandPose => 2,
    }
}

unsafe fn parse_output<T: DeserializeOwned>(
    data: *mut u8,
    len: u64,
    error: *mut c_char,
    status: i32,
) -> Result<Vec<T>, VisionError> {
    if status != 0 || !error.is_null() {
        let msg = if !error.is_null() {
            let s = CStr::from_ptr(error).to_string_lossy().into_owned();
            photolens_vision_free_error(error);
            s
        } else {
            "unknown error".into()
        };
        if !data.is_null() {
            photolens_vision_free_data(data, len);
        }
        return Err(VisionError::Backend(msg));
    }

    if data.is_null() || len == 0 {
        return Ok(Vec::new());
    }

    let slice = std::slice::from_raw_parts(data, len as usize);
    let observations = serde_json::from_slice(slice)
        .map_err(|e| VisionError::InvalidObservation(format!("bridge returned bad JSON: {e}")));
    photolens_vision_free_data(data, len);
    observations
}

/// Runs one Vision request synchronously on the calling thread.
pub fn analyze<T: DeserializeOwned>(
    kind: AnalysisKind,
    image: &ImageInput,
) -> Result<Vec<T>, VisionError> {
    let size = image.size();
    if size.width == 0 || size.height == 0 {
        return Err(VisionError::Decode(format!("empty image ({size})")));
    }

    let pixels = image.rgba();
    let mut data: *mut u8 = std::ptr::null_mut();
    let mut len: u64 = 0;
    let mut error: *mut c_char = std::ptr::null_mut();

    unsafe {
        let status = photolens_vision_analyze(
            request_kind(kind),
            pixels.as_ptr(),
            size.width,
            size.height,
            &mut data,
            &mut len,
            &mut error,
        );
        parse_output(data, len, error, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_matches_bridge_constants() {
        // kindText, kindFaces, kindHandPose in VisionBridge.swift
        assert_eq!(request_kind(AnalysisKind::Text), 0);
        assert_eq!(request_kind(AnalysisKind::Faces), 1);
        assert_eq!(request_kind(AnalysisKind::HandPose), 2);
    }
}
