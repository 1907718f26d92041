//! Image XObjects for rasterized pages.
//!
//! Each exported page embeds one captured bitmap as a PDF Image XObject
//! (spec Section 8.9): Flate-compressed DeviceRGB samples, with the alpha
//! channel carried as a separate DeviceGray soft mask when it is not fully
//! opaque.

use std::collections::HashMap;
use std::io::Write;

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::pdf::object::Object;

/// A page bitmap prepared for embedding.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Flate-compressed RGB samples, 8 bits per component
    pub data: Vec<u8>,
    /// Flate-compressed alpha samples, present only when translucent
    pub soft_mask: Option<Vec<u8>>,
}

impl PageImage {
    /// Prepare an RGBA bitmap for embedding.
    ///
    /// Splits the pixels into an RGB plane and an alpha plane, compresses
    /// both, and drops the alpha plane entirely when every pixel is opaque.
    pub fn from_rgba(bitmap: &RgbaImage) -> Result<Self> {
        let (width, height) = bitmap.dimensions();
        let pixel_count = (width as usize) * (height as usize);

        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        let mut opaque = true;
        for pixel in bitmap.pixels() {
            rgb.push(pixel.0[0]);
            rgb.push(pixel.0[1]);
            rgb.push(pixel.0[2]);
            alpha.push(pixel.0[3]);
            if pixel.0[3] != 0xFF {
                opaque = false;
            }
        }

        Ok(Self {
            width,
            height,
            data: compress(&rgb)?,
            soft_mask: if opaque { None } else { Some(compress(&alpha)?) },
        })
    }

    /// Build the Image XObject dictionary (without the SMask entry; the
    /// writer adds it once the mask object has an id).
    pub fn build_xobject_dict(&self) -> HashMap<String, Object> {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert(
            "ColorSpace".to_string(),
            Object::Name("DeviceRGB".to_string()),
        );
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        dict
    }

    /// Build the soft mask XObject dictionary, if this image carries alpha.
    pub fn build_soft_mask_dict(&self) -> Option<HashMap<String, Object>> {
        self.soft_mask.as_ref().map(|_| {
            let mut dict = HashMap::new();
            dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
            dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
            dict.insert("Width".to_string(), Object::Integer(self.width as i64));
            dict.insert("Height".to_string(), Object::Integer(self.height as i64));
            dict.insert(
                "ColorSpace".to_string(),
                Object::Name("DeviceGray".to_string()),
            );
            dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
            dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            dict
        })
    }
}

/// Compress sample data with Flate for a FlateDecode filter.
fn compress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::EncodingFailure(format!("image compression: {e}")))?;
    encoder
        .finish()
        .map_err(|e| Error::EncodingFailure(format!("image compression: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_image_has_no_mask() {
        let bitmap = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let img = PageImage::from_rgba(&bitmap).unwrap();
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert!(img.soft_mask.is_none());
        assert!(img.build_soft_mask_dict().is_none());
    }

    #[test]
    fn test_translucent_image_carries_mask() {
        let bitmap = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]));
        let img = PageImage::from_rgba(&bitmap).unwrap();
        assert!(img.soft_mask.is_some());
        let mask_dict = img.build_soft_mask_dict().unwrap();
        assert_eq!(
            mask_dict.get("ColorSpace"),
            Some(&Object::Name("DeviceGray".to_string()))
        );
    }

    #[test]
    fn test_xobject_dict_shape() {
        let bitmap = RgbaImage::from_pixel(3, 5, Rgba([0, 0, 0, 255]));
        let img = PageImage::from_rgba(&bitmap).unwrap();
        let dict = img.build_xobject_dict();
        assert_eq!(dict.get("Width"), Some(&Object::Integer(3)));
        assert_eq!(dict.get("Height"), Some(&Object::Integer(5)));
        assert_eq!(
            dict.get("Filter"),
            Some(&Object::Name("FlateDecode".to_string()))
        );
        assert_eq!(
            dict.get("ColorSpace"),
            Some(&Object::Name("DeviceRGB".to_string()))
        );
    }

    #[test]
    fn test_compressed_data_round_trips() {
        use std::io::Read;

        let bitmap = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 255]));
        let img = PageImage::from_rgba(&bitmap).unwrap();
        let mut decoder = flate2::read::ZlibDecoder::new(img.data.as_slice());
        let mut rgb = Vec::new();
        decoder.read_to_end(&mut rgb).unwrap();
        assert_eq!(rgb, vec![1, 2, 3, 1, 2, 3]);
    }
}
