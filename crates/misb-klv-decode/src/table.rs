//! Declarative decode rules for UAS Datalink Local Set tags 1..=142.
//!
//! One [`FieldSpec`] per tag, indexed by `tag - 1`. Physical ranges and code
//! widths follow MISB ST 0601; nested local sets and packed items carry
//! [`Rule::Unsupported`] and are skipped.

use std::fmt;

use crate::remap::linear_remap;
use crate::value::Value;

/// Highest tag id defined by the local set.
pub const MAX_TAG: u8 = 142;

/// How the value bytes of one tag are decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Packet checksum, a big-endian `u16`. Ends the packet.
    Checksum,
    /// 8-byte microseconds since the epoch, narrowed to milliseconds by
    /// truncation toward zero.
    Micros { signed: bool },
    /// Byte string, one char per byte.
    Text,
    /// Raw big-endian unsigned integer of the given width.
    Unsigned(usize),
    /// Raw big-endian two's-complement integer of the given width.
    Signed(usize),
    /// Fixed-point: `range / full_scale * code + offset`, where `full_scale`
    /// is `2^(8w) - 1` for unsigned codes and `2^(8w) - 2` for signed ones.
    Scaled {
        width: usize,
        signed: bool,
        range: f64,
        offset: f64,
    },
    /// Unsigned code multiplied by a whole factor.
    Multiple { width: usize, factor: u64 },
    /// IEEE-754 single precision.
    Float32,
    /// Variable-width linear remap over `[min, max]`.
    Remap { min: f64, max: f64 },
    /// Recognized but not decoded; the value is skipped.
    Unsupported,
}

impl Rule {
    /// Required value length, or `None` for variable-width rules.
    pub fn width(&self) -> Option<usize> {
        match self {
            Rule::Checksum => Some(2),
            Rule::Micros { .. } => Some(8),
            Rule::Unsigned(w) | Rule::Signed(w) => Some(*w),
            Rule::Scaled { width, .. } | Rule::Multiple { width, .. } => Some(*width),
            Rule::Float32 => Some(4),
            Rule::Text | Rule::Remap { .. } | Rule::Unsupported => None,
        }
    }

    /// Decode `bytes` with this rule.
    ///
    /// Returns `None` for unsupported tags and for values whose length does not
    /// fit the rule.
    pub fn decode(&self, bytes: &[u8]) -> Option<Value> {
        if let Some(width) = self.width() {
            if bytes.len() != width {
                return None;
            }
        }

        match *self {
            Rule::Checksum => Some(Value::UInt(read_unsigned(bytes))),
            Rule::Micros { signed: false } => Some(Value::UInt(read_unsigned(bytes) / 1000)),
            Rule::Micros { signed: true } => Some(Value::Int(read_signed(bytes) / 1000)),
            Rule::Text => Some(Value::Text(bytes.iter().map(|&b| char::from(b)).collect())),
            Rule::Unsigned(_) => Some(Value::UInt(read_unsigned(bytes))),
            Rule::Signed(_) => Some(Value::Int(read_signed(bytes))),
            Rule::Scaled {
                width,
                signed,
                range,
                offset,
            } => {
                let levels = ((8 * width) as f64).exp2();
                let (code, full_scale) = if signed {
                    (read_signed(bytes) as f64, levels - 2.0)
                } else {
                    (read_unsigned(bytes) as f64, levels - 1.0)
                };
                Some(Value::Float(range / full_scale * code + offset))
            }
            Rule::Multiple { factor, .. } => Some(Value::UInt(read_unsigned(bytes) * factor)),
            Rule::Float32 => {
                let raw = u32::try_from(read_unsigned(bytes)).ok()?;
                Some(Value::Float(f64::from(f32::from_bits(raw))))
            }
            Rule::Remap { min, max } => {
                if bytes.is_empty() || bytes.len() > 8 {
                    return None;
                }
                Some(Value::Float(linear_remap(
                    min,
                    max,
                    bytes.len(),
                    read_unsigned(bytes),
                )))
            }
            Rule::Unsupported => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Rule::Checksum => f.write_str("checksum"),
            Rule::Micros { signed: false } => f.write_str("us->ms u64"),
            Rule::Micros { signed: true } => f.write_str("us->ms i64"),
            Rule::Text => f.write_str("text"),
            Rule::Unsigned(w) => write!(f, "u{}", 8 * w),
            Rule::Signed(w) => write!(f, "i{}", 8 * w),
            Rule::Scaled {
                width,
                signed,
                range,
                offset,
            } => {
                let kind = if signed { 'i' } else { 'u' };
                write!(f, "{kind}{} range {range}", 8 * width)?;
                if offset != 0.0 {
                    write!(f, " offset {offset}")?;
                }
                Ok(())
            }
            Rule::Multiple { width, factor } => write!(f, "u{} x{factor}", 8 * width),
            Rule::Float32 => f.write_str("f32"),
            Rule::Remap { min, max } => write!(f, "remap [{min}, {max}]"),
            Rule::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Static descriptor of one local-set tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Local tag id.
    pub tag: u8,
    /// Output field name.
    pub name: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Decode rule.
    pub rule: Rule,
}

/// Field spec for `tag`; `None` outside 1..=142.
pub fn field_spec(tag: u8) -> Option<&'static FieldSpec> {
    match tag {
        1..=MAX_TAG => FIELDS.get(usize::from(tag) - 1),
        _ => None,
    }
}

fn read_unsigned(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

fn read_signed(bytes: &[u8]) -> i64 {
    let bits = 8 * bytes.len();
    if bits == 0 || bits > 64 {
        return 0;
    }
    let unused = 64 - bits as u32;
    ((read_unsigned(bytes) << unused) as i64) >> unused
}

const fn spec(tag: u8, name: &'static str, label: &'static str, rule: Rule) -> FieldSpec {
    FieldSpec {
        tag,
        name,
        label,
        rule,
    }
}

const fn unsigned_scaled(width: usize, range: f64) -> Rule {
    Rule::Scaled {
        width,
        signed: false,
        range,
        offset: 0.0,
    }
}

const fn signed_scaled(width: usize, range: f64) -> Rule {
    Rule::Scaled {
        width,
        signed: true,
        range,
        offset: 0.0,
    }
}

/// 0..360 degrees over 16 bits.
const HEADING: Rule = unsigned_scaled(2, 360.0);
/// ±90 degrees over signed 32 bits.
const LATITUDE: Rule = signed_scaled(4, 180.0);
/// ±180 degrees over signed 32 bits.
const LONGITUDE: Rule = signed_scaled(4, 360.0);
/// -900..19000 meters over 16 bits.
const ALTITUDE: Rule = Rule::Scaled {
    width: 2,
    signed: false,
    range: 19_900.0,
    offset: -900.0,
};
/// ±0.075 degrees over signed 16 bits.
const CORNER_OFFSET: Rule = signed_scaled(2, 0.15);
/// 0..5000 millibar over 16 bits.
const PRESSURE: Rule = unsigned_scaled(2, 5000.0);
/// -900..40000 meters, variable width.
const ALTITUDE_EXTENDED: Rule = Rule::Remap {
    min: -900.0,
    max: 40_000.0,
};
/// ±1000 degrees per second, variable width.
const ANGULAR_RATE: Rule = Rule::Remap {
    min: -1000.0,
    max: 1000.0,
};

/// Decode rules indexed by `tag - 1`.
pub static FIELDS: [FieldSpec; MAX_TAG as usize] = [
    spec(1, "checksum", "Checksum", Rule::Checksum),
    spec(2, "timestamp", "Precision Time Stamp", Rule::Micros { signed: false }),
    spec(3, "mission_id", "Mission ID", Rule::Text),
    spec(4, "platform_tail_number", "Platform Tail Number", Rule::Text),
    spec(5, "platform_heading_angle", "Platform Heading Angle", HEADING),
    spec(6, "platform_pitch_angle", "Platform Pitch Angle", signed_scaled(2, 40.0)),
    spec(7, "platform_roll_angle", "Platform Roll Angle", signed_scaled(2, 100.0)),
    spec(8, "platform_true_airspeed", "Platform True Airspeed", Rule::Unsigned(1)),
    spec(9, "platform_indicated_airspeed", "Platform Indicated Airspeed", Rule::Unsigned(1)),
    spec(10, "platform_designation", "Platform Designation", Rule::Text),
    spec(11, "image_source_sensor", "Image Source Sensor", Rule::Text),
    spec(12, "image_coordinate_system", "Image Coordinate System", Rule::Text),
    spec(13, "sensor_latitude", "Sensor Latitude", LATITUDE),
    spec(14, "sensor_longitude", "Sensor Longitude", LONGITUDE),
    spec(15, "sensor_true_altitude", "Sensor True Altitude", ALTITUDE),
    spec(16, "sensor_horizontal_fov", "Sensor Horizontal Field of View", unsigned_scaled(2, 180.0)),
    spec(17, "sensor_vertical_fov", "Sensor Vertical Field of View", unsigned_scaled(2, 180.0)),
    spec(18, "sensor_relative_azimuth_angle", "Sensor Relative Azimuth Angle", unsigned_scaled(4, 360.0)),
    spec(19, "sensor_relative_elevation_angle", "Sensor Relative Elevation Angle", signed_scaled(4, 360.0)),
    spec(20, "sensor_relative_roll_angle", "Sensor Relative Roll Angle", unsigned_scaled(4, 360.0)),
    spec(21, "slant_range", "Slant Range", unsigned_scaled(4, 5_000_000.0)),
    spec(22, "target_width", "Target Width", unsigned_scaled(2, 10_000.0)),
    spec(23, "frame_center_latitude", "Frame Center Latitude", LATITUDE),
    spec(24, "frame_center_longitude", "Frame Center Longitude", LONGITUDE),
    spec(25, "frame_center_elevation", "Frame Center Elevation", ALTITUDE),
    spec(26, "offset_corner_latitude_point_1", "Offset Corner Latitude Point 1", CORNER_OFFSET),
    spec(27, "offset_corner_longitude_point_1", "Offset Corner Longitude Point 1", CORNER_OFFSET),
    spec(28, "offset_corner_latitude_point_2", "Offset Corner Latitude Point 2", CORNER_OFFSET),
    spec(29, "offset_corner_longitude_point_2", "Offset Corner Longitude Point 2", CORNER_OFFSET),
    spec(30, "offset_corner_latitude_point_3", "Offset Corner Latitude Point 3", CORNER_OFFSET),
    spec(31, "offset_corner_longitude_point_3", "Offset Corner Longitude Point 3", CORNER_OFFSET),
    spec(32, "offset_corner_latitude_point_4", "Offset Corner Latitude Point 4", CORNER_OFFSET),
    spec(33, "offset_corner_longitude_point_4", "Offset Corner Longitude Point 4", CORNER_OFFSET),
    spec(34, "icing_detected", "Icing Detected", Rule::Unsigned(1)),
    spec(35, "wind_direction", "Wind Direction", HEADING),
    spec(36, "wind_speed", "Wind Speed", unsigned_scaled(1, 100.0)),
    spec(37, "static_pressure", "Static Pressure", PRESSURE),
    spec(38, "density_altitude", "Density Altitude", ALTITUDE),
    spec(39, "outside_air_temperature", "Outside Air Temperature", Rule::Signed(1)),
    spec(40, "target_location_latitude", "Target Location Latitude", LATITUDE),
    spec(41, "target_location_longitude", "Target Location Longitude", LONGITUDE),
    spec(42, "target_location_elevation", "Target Location Elevation", ALTITUDE),
    spec(43, "target_track_gate_width", "Target Track Gate Width", Rule::Multiple { width: 1, factor: 2 }),
    spec(44, "target_track_gate_height", "Target Track Gate Height", Rule::Multiple { width: 1, factor: 2 }),
    spec(45, "target_error_estimate_ce90", "Target Error Estimate - CE90", unsigned_scaled(2, 4095.0)),
    spec(46, "target_error_estimate_le90", "Target Error Estimate - LE90", unsigned_scaled(2, 4095.0)),
    spec(47, "generic_flag_data", "Generic Flag Data", Rule::Unsigned(1)),
    spec(48, "security_local_set", "Security Local Set", Rule::Unsupported),
    spec(49, "differential_pressure", "Differential Pressure", PRESSURE),
    spec(50, "platform_angle_of_attack", "Platform Angle of Attack", signed_scaled(2, 40.0)),
    spec(51, "platform_vertical_speed", "Platform Vertical Speed", signed_scaled(2, 360.0)),
    spec(52, "platform_sideslip_angle", "Platform Sideslip Angle", signed_scaled(2, 40.0)),
    spec(53, "airfield_barometric_pressure", "Airfield Barometric Pressure", PRESSURE),
    spec(54, "airfield_elevation", "Airfield Elevation", ALTITUDE),
    spec(55, "relative_humidity", "Relative Humidity", unsigned_scaled(1, 100.0)),
    spec(56, "platform_ground_speed", "Platform Ground Speed", Rule::Unsigned(1)),
    spec(57, "ground_range", "Ground Range", unsigned_scaled(4, 5_000_000.0)),
    spec(58, "platform_fuel_remaining", "Platform Fuel Remaining", unsigned_scaled(2, 10_000.0)),
    spec(59, "platform_call_sign", "Platform Call Sign", Rule::Text),
    spec(60, "weapon_load", "Weapon Load", Rule::Unsigned(2)),
    spec(61, "weapon_fired", "Weapon Fired", Rule::Unsigned(1)),
    spec(62, "laser_prf_code", "Laser PRF Code", Rule::Unsigned(2)),
    spec(63, "sensor_fov_name", "Sensor Field of View Name", Rule::Unsigned(1)),
    spec(64, "platform_magnetic_heading", "Platform Magnetic Heading", HEADING),
    spec(65, "uas_lds_version", "UAS Datalink LS Version Number", Rule::Unsigned(1)),
    spec(66, "target_location_covariance_matrix", "Target Location Covariance Matrix", Rule::Unsupported),
    spec(67, "alternate_platform_latitude", "Alternate Platform Latitude", LATITUDE),
    spec(68, "alternate_platform_longitude", "Alternate Platform Longitude", LONGITUDE),
    spec(69, "alternate_platform_altitude", "Alternate Platform Altitude", ALTITUDE),
    spec(70, "alternate_platform_name", "Alternate Platform Name", Rule::Text),
    spec(71, "alternate_platform_heading", "Alternate Platform Heading", HEADING),
    spec(72, "event_start_time_utc", "Event Start Time - UTC", Rule::Micros { signed: false }),
    spec(73, "rvt_local_set", "RVT Local Set", Rule::Unsupported),
    spec(74, "vmti_local_set", "VMTI Local Set", Rule::Unsupported),
    spec(75, "sensor_ellipsoid_height", "Sensor Ellipsoid Height", ALTITUDE),
    spec(76, "alternate_platform_ellipsoid_height", "Alternate Platform Ellipsoid Height", ALTITUDE),
    spec(77, "operational_mode", "Operational Mode", Rule::Unsigned(1)),
    spec(78, "frame_center_height_above_ellipsoid", "Frame Center Height Above Ellipsoid", ALTITUDE),
    spec(79, "sensor_north_velocity", "Sensor North Velocity", signed_scaled(2, 654.0)),
    spec(80, "sensor_east_velocity", "Sensor East Velocity", signed_scaled(2, 654.0)),
    spec(81, "image_horizon_pixel_pack", "Image Horizon Pixel Pack", Rule::Unsupported),
    spec(82, "corner_latitude_point_1_full", "Corner Latitude Point 1 (Full)", LATITUDE),
    spec(83, "corner_longitude_point_1_full", "Corner Longitude Point 1 (Full)", LONGITUDE),
    spec(84, "corner_latitude_point_2_full", "Corner Latitude Point 2 (Full)", LATITUDE),
    spec(85, "corner_longitude_point_2_full", "Corner Longitude Point 2 (Full)", LONGITUDE),
    spec(86, "corner_latitude_point_3_full", "Corner Latitude Point 3 (Full)", LATITUDE),
    spec(87, "corner_longitude_point_3_full", "Corner Longitude Point 3 (Full)", LONGITUDE),
    spec(88, "corner_latitude_point_4_full", "Corner Latitude Point 4 (Full)", LATITUDE),
    spec(89, "corner_longitude_point_4_full", "Corner Longitude Point 4 (Full)", LONGITUDE),
    spec(90, "platform_pitch_angle_full", "Platform Pitch Angle (Full)", LATITUDE),
    spec(91, "platform_roll_angle_full", "Platform Roll Angle (Full)", LATITUDE),
    spec(92, "platform_angle_of_attack_full", "Platform Angle of Attack (Full)", LATITUDE),
    spec(93, "platform_sideslip_angle_full", "Platform Sideslip Angle (Full)", LONGITUDE),
    spec(94, "miis_core_identifier", "MIIS Core Identifier", Rule::Unsupported),
    spec(95, "sar_motion_imagery_local_set", "SAR Motion Imagery Local Set", Rule::Unsupported),
    spec(96, "target_width_extended", "Target Width Extended", Rule::Remap { min: 0.0, max: 1_500_000.0 }),
    spec(97, "range_image_local_set", "Range Image Local Set", Rule::Unsupported),
    spec(98, "geo_registration_local_set", "Geo-Registration Local Set", Rule::Unsupported),
    spec(99, "composite_imaging_local_set", "Composite Imaging Local Set", Rule::Unsupported),
    spec(100, "segment_local_set", "Segment Local Set", Rule::Unsupported),
    spec(101, "amend_local_set", "Amend Local Set", Rule::Unsupported),
    spec(102, "sdcc_flp", "SDCC-FLP", Rule::Unsupported),
    spec(103, "density_altitude_extended", "Density Altitude Extended", ALTITUDE_EXTENDED),
    spec(104, "sensor_ellipsoid_height_extended", "Sensor Ellipsoid Height Extended", ALTITUDE_EXTENDED),
    spec(105, "alternate_platform_ellipsoid_height_extended", "Alternate Platform Ellipsoid Height Extended", ALTITUDE_EXTENDED),
    spec(106, "stream_designator", "Stream Designator", Rule::Text),
    spec(107, "operational_base", "Operational Base", Rule::Text),
    spec(108, "broadcast_source", "Broadcast Source", Rule::Text),
    spec(109, "range_to_recovery_location", "Range To Recovery Location", Rule::Remap { min: 0.0, max: 21_000.0 }),
    spec(110, "time_airborne", "Time Airborne", Rule::Unsigned(4)),
    spec(111, "propulsion_unit_speed", "Propulsion Unit Speed", Rule::Unsigned(4)),
    spec(112, "platform_course_angle", "Platform Course Angle", Rule::Remap { min: 0.0, max: 360.0 }),
    spec(113, "altitude_agl", "Altitude Above Ground Level (AGL)", ALTITUDE_EXTENDED),
    spec(114, "radar_altimeter", "Radar Altimeter", ALTITUDE_EXTENDED),
    spec(115, "control_command", "Control Command", Rule::Unsupported),
    spec(116, "control_command_verification_list", "Control Command Verification List", Rule::Unsupported),
    spec(117, "sensor_azimuth_rate", "Sensor Azimuth Rate", ANGULAR_RATE),
    spec(118, "sensor_elevation_rate", "Sensor Elevation Rate", ANGULAR_RATE),
    spec(119, "sensor_roll_rate", "Sensor Roll Rate", ANGULAR_RATE),
    spec(120, "onboard_mi_storage_percent_full", "On-board MI Storage Percent Full", Rule::Float32),
    spec(121, "active_wavelength_list", "Active Wavelength List", Rule::Unsupported),
    spec(122, "country_codes", "Country Codes", Rule::Unsupported),
    spec(123, "number_of_navsats_in_view", "Number of NAVSATs in View", Rule::Unsigned(1)),
    spec(124, "positioning_method_source", "Positioning Method Source", Rule::Unsigned(1)),
    spec(125, "platform_status", "Platform Status", Rule::Unsigned(1)),
    spec(126, "sensor_control_mode", "Sensor Control Mode", Rule::Unsigned(1)),
    spec(127, "sensor_frame_rate_pack", "Sensor Frame Rate Pack", Rule::Unsupported),
    spec(128, "wavelengths_list", "Wavelengths List", Rule::Unsupported),
    spec(129, "target_id", "Target ID", Rule::Text),
    spec(130, "airbase_locations", "Airbase Locations", Rule::Unsupported),
    spec(131, "take_off_time", "Take-off Time", Rule::Micros { signed: false }),
    spec(132, "transmission_frequency", "Transmission Frequency", Rule::Remap { min: 1.0, max: 99_999.0 }),
    spec(133, "onboard_mi_storage_capacity", "On-board MI Storage Capacity", Rule::Unsigned(4)),
    spec(134, "zoom_percentage", "Zoom Percentage", Rule::Remap { min: 0.0, max: 100.0 }),
    spec(135, "communications_method", "Communications Method", Rule::Text),
    spec(136, "leap_seconds", "Leap Seconds", Rule::Signed(4)),
    spec(137, "correction_offset", "Correction Offset", Rule::Micros { signed: true }),
    spec(138, "payload_list", "Payload List", Rule::Unsupported),
    spec(139, "active_payloads", "Active Payloads", Rule::Unsupported),
    spec(140, "weapons_stores", "Weapons Stores", Rule::Unsupported),
    spec(141, "waypoint_list", "Waypoint List", Rule::Unsupported),
    spec(142, "view_domain", "View Domain", Rule::Unsupported),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Expect {
        Absent,
        UInt(u64),
        Int(i64),
        Float(f64),
        Text(&'static str),
    }

    use Expect::{Absent, Float, Int, Text, UInt};

    const LAT_MAX: &[u8] = &[0x7F, 0xFF, 0xFF, 0xFF];
    const LAT_MIN: &[u8] = &[0x80, 0x00, 0x00, 0x01];
    const ZERO2: &[u8] = &[0x00, 0x00];
    const ZERO4: &[u8] = &[0x00, 0x00, 0x00, 0x00];
    const FULL2: &[u8] = &[0xFF, 0xFF];
    const FULL4: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF];
    const POS2: &[u8] = &[0x7F, 0xFF];
    const NEG2: &[u8] = &[0x80, 0x01];

    /// One row per tag: value bytes and the expected decode.
    const ROWS: &[(u8, &[u8], Expect)] = &[
        (1, &[0x12, 0x34], UInt(0x1234)),
        (2, &[0x00, 0x00, 0x01, 0x7C, 0x6E, 0x3A, 0x8A, 0x00], UInt(1_633_936_902)),
        (3, b"MISSION", Text("MISSION")),
        (4, b"N123", Text("N123")),
        (5, FULL2, Float(360.0)),
        (6, POS2, Float(20.0)),
        (7, NEG2, Float(-50.0)),
        (8, &[147], UInt(147)),
        (9, &[146], UInt(146)),
        (10, b"MQ1-B", Text("MQ1-B")),
        (11, b"EO", Text("EO")),
        (12, b"WGS-84", Text("WGS-84")),
        (13, LAT_MAX, Float(90.0)),
        (14, LAT_MIN, Float(-180.0)),
        (15, ZERO2, Float(-900.0)),
        (16, FULL2, Float(180.0)),
        (17, ZERO2, Float(0.0)),
        (18, FULL4, Float(360.0)),
        (19, LAT_MAX, Float(180.0)),
        (20, ZERO4, Float(0.0)),
        (21, FULL4, Float(5_000_000.0)),
        (22, FULL2, Float(10_000.0)),
        (23, ZERO4, Float(0.0)),
        (24, LAT_MAX, Float(180.0)),
        (25, FULL2, Float(19_000.0)),
        (26, POS2, Float(0.075)),
        (27, NEG2, Float(-0.075)),
        (28, POS2, Float(0.075)),
        (29, NEG2, Float(-0.075)),
        (30, POS2, Float(0.075)),
        (31, NEG2, Float(-0.075)),
        (32, POS2, Float(0.075)),
        (33, NEG2, Float(-0.075)),
        (34, &[1], UInt(1)),
        (35, FULL2, Float(360.0)),
        (36, &[0xFF], Float(100.0)),
        (37, FULL2, Float(5000.0)),
        (38, ZERO2, Float(-900.0)),
        (39, &[0xF6], Int(-10)),
        (40, LAT_MIN, Float(-90.0)),
        (41, ZERO4, Float(0.0)),
        (42, FULL2, Float(19_000.0)),
        (43, &[10], UInt(20)),
        (44, &[0xFF], UInt(510)),
        (45, FULL2, Float(4095.0)),
        (46, ZERO2, Float(0.0)),
        (47, &[0x31], UInt(0x31)),
        (48, &[0x01, 0x01, 0x01], Absent),
        (49, FULL2, Float(5000.0)),
        (50, POS2, Float(20.0)),
        (51, NEG2, Float(-180.0)),
        (52, POS2, Float(20.0)),
        (53, ZERO2, Float(0.0)),
        (54, FULL2, Float(19_000.0)),
        (55, &[0xFF], Float(100.0)),
        (56, &[140], UInt(140)),
        (57, FULL4, Float(5_000_000.0)),
        (58, FULL2, Float(10_000.0)),
        (59, b"BOXER21", Text("BOXER21")),
        (60, &[0x0A, 0xBB], UInt(0x0ABB)),
        (61, &[0xBA], UInt(0xBA)),
        (62, &[0x06, 0x00], UInt(1536)),
        (63, &[2], UInt(2)),
        (64, ZERO2, Float(0.0)),
        (65, &[17], UInt(17)),
        (66, ZERO4, Absent),
        (67, LAT_MAX, Float(90.0)),
        (68, LAT_MIN, Float(-180.0)),
        (69, ZERO2, Float(-900.0)),
        (70, b"APACHE", Text("APACHE")),
        (71, FULL2, Float(360.0)),
        (72, &[0x00, 0x04, 0x59, 0xF4, 0xA6, 0xAA, 0x4A, 0xA8], UInt(1_224_807_209_913)),
        (73, &[0x01], Absent),
        (74, &[0x01], Absent),
        (75, FULL2, Float(19_000.0)),
        (76, ZERO2, Float(-900.0)),
        (77, &[1], UInt(1)),
        (78, FULL2, Float(19_000.0)),
        (79, POS2, Float(327.0)),
        (80, NEG2, Float(-327.0)),
        (81, &[0x01], Absent),
        (82, LAT_MAX, Float(90.0)),
        (83, LAT_MAX, Float(180.0)),
        (84, LAT_MIN, Float(-90.0)),
        (85, LAT_MIN, Float(-180.0)),
        (86, ZERO4, Float(0.0)),
        (87, ZERO4, Float(0.0)),
        (88, LAT_MAX, Float(90.0)),
        (89, LAT_MAX, Float(180.0)),
        (90, LAT_MAX, Float(90.0)),
        (91, LAT_MIN, Float(-90.0)),
        (92, LAT_MAX, Float(90.0)),
        (93, LAT_MAX, Float(180.0)),
        (94, &[0x01], Absent),
        (95, &[0x01], Absent),
        (96, &[0x01, 0x00], Float(16_384.0)),
        (97, &[0x01], Absent),
        (98, &[0x01], Absent),
        (99, &[0x01], Absent),
        (100, &[0x01], Absent),
        (101, &[0x01], Absent),
        (102, &[0x01], Absent),
        (103, &[0x01, 0xC2], Float(0.0)),
        (104, ZERO2, Float(-900.0)),
        (105, &[0x01, 0xC2, 0x00], Float(0.0)),
        (106, b"BLUE", Text("BLUE")),
        (107, b"BASE01", Text("BASE01")),
        (108, b"HDTV", Text("HDTV")),
        (109, &[0x03, 0xE8], Float(1000.0)),
        (110, &[0x00, 0x00, 0x0E, 0x10], UInt(3600)),
        (111, &[0x00, 0x00, 0x03, 0xE8], UInt(1000)),
        (112, &[0x16, 0x80], Float(90.0)),
        (113, &[0x01, 0xC2], Float(0.0)),
        (114, ZERO2, Float(-900.0)),
        (115, &[0x01], Absent),
        (116, &[0x01], Absent),
        (117, &[0x3E, 0x80], Float(0.0)),
        (118, ZERO2, Float(-1000.0)),
        (119, &[0x7D, 0x00], Float(1000.0)),
        (120, &[0x42, 0x48, 0x00, 0x00], Float(50.0)),
        (121, &[0x01], Absent),
        (122, &[0x01], Absent),
        (123, &[7], UInt(7)),
        (124, &[0x3F], UInt(0x3F)),
        (125, &[0], UInt(0)),
        (126, &[1], UInt(1)),
        (127, &[0x01], Absent),
        (128, &[0x01], Absent),
        (129, b"TGT-7", Text("TGT-7")),
        (130, &[0x01], Absent),
        (131, &[0x00, 0x04, 0x59, 0xF4, 0xA6, 0xAA, 0x4A, 0xA8], UInt(1_224_807_209_913)),
        (132, &[0x00, 0x64], Float(401.0)),
        (133, &[0x00, 0x00, 0x10, 0x00], UInt(4096)),
        (134, &[50], Float(50.0)),
        (135, b"Ku-band", Text("Ku-band")),
        (136, &[0x00, 0x00, 0x00, 0x25], Int(37)),
        (137, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xF8, 0x30], Int(-2)),
        (138, &[0x01], Absent),
        (139, &[0x01], Absent),
        (140, &[0x01], Absent),
        (141, &[0x01], Absent),
        (142, &[0x01], Absent),
    ];

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
    }

    #[test]
    fn table_is_indexed_by_tag() {
        assert_eq!(FIELDS.len(), usize::from(MAX_TAG));
        for (index, field) in FIELDS.iter().enumerate() {
            assert_eq!(usize::from(field.tag), index + 1, "{}", field.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIELDS.len());
    }

    #[test]
    fn lookup_outside_range_is_none() {
        assert!(field_spec(0).is_none());
        assert!(field_spec(143).is_none());
        assert!(field_spec(200).is_none());
        assert_eq!(field_spec(1).map(|f| f.name), Some("checksum"));
        assert_eq!(field_spec(142).map(|f| f.name), Some("view_domain"));
    }

    #[test]
    fn every_tag_has_a_row() {
        let tags: Vec<u8> = ROWS.iter().map(|(tag, _, _)| *tag).collect();
        let expected: Vec<u8> = (1..=MAX_TAG).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn decodes_every_tag() {
        for (tag, bytes, expect) in ROWS {
            let spec = field_spec(*tag).unwrap();
            let decoded = spec.rule.decode(bytes);
            match (expect, decoded) {
                (Absent, None) => {}
                (UInt(want), Some(Value::UInt(got))) => assert_eq!(*want, got, "tag {tag}"),
                (Int(want), Some(Value::Int(got))) => assert_eq!(*want, got, "tag {tag}"),
                (Float(want), Some(Value::Float(got))) => {
                    assert!(close(got, *want), "tag {tag}: {got} != {want}")
                }
                (Text(want), Some(Value::Text(got))) => assert_eq!(*want, got, "tag {tag}"),
                (want, got) => panic!("tag {tag}: expected {want:?}, got {got:?}"),
            }
        }
    }

    #[test]
    fn fixed_width_rules_reject_other_lengths() {
        let heading = field_spec(5).unwrap();
        assert_eq!(heading.rule.width(), Some(2));
        assert_eq!(heading.rule.decode(&[0xFF]), None);
        assert_eq!(heading.rule.decode(&[0xFF, 0xFF, 0xFF]), None);

        let timestamp = field_spec(2).unwrap();
        assert_eq!(timestamp.rule.decode(&[0x01; 4]), None);
    }

    #[test]
    fn remap_rules_accept_any_width_up_to_eight() {
        let course = field_spec(112).unwrap();
        assert_eq!(course.rule.width(), None);
        assert!(course.rule.decode(&[0x10]).is_some());
        assert!(course.rule.decode(&[0x10; 8]).is_some());
        assert_eq!(course.rule.decode(&[]), None);
        assert_eq!(course.rule.decode(&[0x10; 9]), None);
    }

    #[test]
    fn microseconds_truncate_toward_zero() {
        let rule = Rule::Micros { signed: true };
        assert_eq!(rule.decode(&(-1999i64).to_be_bytes()), Some(Value::Int(-1)));
        assert_eq!(rule.decode(&1999i64.to_be_bytes()), Some(Value::Int(1)));

        let rule = Rule::Micros { signed: false };
        assert_eq!(rule.decode(&1999u64.to_be_bytes()), Some(Value::UInt(1)));
    }

    #[test]
    fn text_maps_each_byte_to_one_char() {
        let rule = Rule::Text;
        assert_eq!(rule.decode(&[]), Some(Value::Text(String::new())));
        assert_eq!(
            rule.decode(&[0x41, 0xE9]),
            Some(Value::Text("A\u{e9}".to_string()))
        );
    }

    #[test]
    fn rules_display_compactly() {
        assert_eq!(field_spec(1).unwrap().rule.to_string(), "checksum");
        assert_eq!(field_spec(5).unwrap().rule.to_string(), "u16 range 360");
        assert_eq!(
            field_spec(15).unwrap().rule.to_string(),
            "u16 range 19900 offset -900"
        );
        assert_eq!(field_spec(48).unwrap().rule.to_string(), "unsupported");
        assert_eq!(Rule::Signed(2).to_string(), "i16");
    }
}
