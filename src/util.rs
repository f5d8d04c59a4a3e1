//! Binary save/load for configuration values.

use std::{fs, io, path::Path};

use bincode::{config, Decode, Encode};

/// Serialize `data` to `path`. Used for parameter bundles, not simulation
/// state; particle state never persists across runs.
pub fn save<T: Encode>(path: &Path, data: &T) -> io::Result<()> {
    let encoded = bincode::encode_to_vec(data, config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, encoded)
}

/// Deserialize a value previously written with [`save`].
pub fn load<T: Decode<()>>(path: &Path) -> io::Result<T> {
    let bytes = fs::read(path)?;
    let (decoded, _len) = bincode::decode_from_slice(&bytes, config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kernel, SimParams, StateEquation};

    #[test]
    fn params_round_trip_through_disk() {
        let mut params = SimParams::default();
        params.h = 0.42;
        params.kernel = Kernel::Linear;
        params.equation_of_state = StateEquation::Cole {
            rest_density: 998.,
            speed_of_sound: 1_480.,
            adiabatic_index: 7.,
            background_pressure: 101_325.,
        };

        let dir = std::env::temp_dir().join("sph2d_util_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("params.sph");

        save(&path, &params).unwrap();
        let loaded: SimParams = load(&path).unwrap();

        assert_eq!(loaded.h, 0.42);
        assert_eq!(loaded.kernel, Kernel::Linear);
        assert_eq!(loaded.equation_of_state, params.equation_of_state);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn loading_a_missing_file_errors() {
        let result: io::Result<SimParams> = load(Path::new("definitely/not/here.sph"));
        assert!(result.is_err());
    }
}
