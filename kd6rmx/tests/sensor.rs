//! Sensor operations against a scripted control port

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use kd6rmx::{
    BitDepth, Connector, Direction, Interface, LedTarget, OutputConfig, Port, Reading, Register,
    Sensor, TestPattern, TrafficRecord, TrafficSink,
};
use kd6rmx_types::{
    BaudRate, Frequency, LedState, OutputMode, PixelFormat, PulseDivider, Resolution, SyncMode,
};

/// What the port does after a request is written
#[derive(Debug, Clone, Copy)]
enum Reply {
    Frame(&'static str),
    Silent,
    Empty,
}

struct ScriptedPort {
    reply: Reply,
    sent: Arc<Mutex<Vec<String>>>,
    done: bool,
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reply {
            Reply::Frame(frame) if !self.done => {
                self.done = true;
                let bytes = frame.as_bytes();
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(bytes.len())
            }
            Reply::Empty => Ok(0),
            _ => Err(io::ErrorKind::TimedOut.into()),
        }
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sent.lock().push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Answers each opened port with the next scripted reply
#[derive(Clone, Default)]
struct ScriptedConnector {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConnector {
    fn replying(replies: &[Reply]) -> Self {
        let connector = Self::default();
        connector.replies.lock().extend(replies.iter().copied());
        connector
    }

    fn frames(frames: &[&'static str]) -> Self {
        let replies: Vec<_> = frames.iter().map(|&f| Reply::Frame(f)).collect();
        Self::replying(&replies)
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl Connector for ScriptedConnector {
    fn open(&self) -> kd6rmx_transport::Result<Box<dyn Port>> {
        let reply = self.replies.lock().pop_front().unwrap_or(Reply::Silent);

        Ok(Box::new(ScriptedPort {
            reply,
            sent: Arc::clone(&self.sent),
            done: false,
        }))
    }

    fn describe(&self) -> String {
        "scripted".into()
    }
}

fn sensor(connector: &ScriptedConnector) -> Sensor {
    Sensor::new(connector.clone()).with_timeout(Duration::from_millis(50))
}

#[test]
fn test_set_output_frequency() {
    let port = ScriptedConnector::frames(&["000D\r"]);

    sensor(&port).set_output_frequency(60.0).unwrap();

    assert_eq!(port.sent(), vec!["OF0D\r"]);
}

#[test]
fn test_set_pixel_output_format() {
    let port = ScriptedConnector::frames(&["0002\r"]);

    sensor(&port)
        .set_pixel_output_format(BitDepth::Bits10, Interface::Serial, OutputConfig::Medium, 2)
        .unwrap();

    assert_eq!(port.sent(), vec!["OC02\r"]);
}

#[test]
fn test_pixel_format_base_multi_channel_rejected() {
    let port = ScriptedConnector::default();

    let err = sensor(&port)
        .set_pixel_output_format(BitDepth::Bits8, Interface::Parallel, OutputConfig::Base, 2)
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(port.sent().is_empty());
}

#[test]
fn test_led_control() {
    let port = ScriptedConnector::frames(&["000F\r", "0000\r"]);
    let mut sensor = sensor(&port);

    sensor.led_control(LedTarget::AB, true, 8).unwrap();
    sensor.led_control(LedTarget::A, false, 4).unwrap();

    assert_eq!(port.sent(), vec!["LC0F\r", "LC00\r"]);
}

#[test]
fn test_led_duty_cycle_bounds() {
    let port = ScriptedConnector::frames(&["0020\r", "0040\r"]);
    let mut sensor = sensor(&port);

    sensor.led_duty_cycle(LedTarget::A, 1).unwrap();
    sensor.led_duty_cycle(LedTarget::B, 4095).unwrap();
    assert!(sensor.led_duty_cycle(LedTarget::A, 0).unwrap_err().is_invalid_argument());
    assert!(sensor.led_duty_cycle(LedTarget::B, 4096).unwrap_err().is_invalid_argument());
    assert!(sensor.led_duty_cycle(LedTarget::AB, 100).unwrap_err().is_invalid_argument());

    assert_eq!(port.sent(), vec!["LC200001\r", "LC400FFF\r"]);
}

#[test]
fn test_set_gain_level() {
    let port = ScriptedConnector::frames(&["0021\r", "0020\r", "0020\r", "0021\r"]);
    let mut sensor = sensor(&port);

    sensor.set_gain_level(-500).unwrap();
    sensor.set_gain_level(500).unwrap();
    sensor.set_gain_level(3071).unwrap();
    sensor.set_gain_level(-1027).unwrap();
    assert!(sensor.set_gain_level(3072).unwrap_err().is_invalid_argument());
    assert!(sensor.set_gain_level(-1028).unwrap_err().is_invalid_argument());

    assert_eq!(
        port.sent(),
        vec!["PG2101F4\r", "PG2001F4\r", "PG200BFF\r", "PG210403\r"]
    );
}

#[test]
fn test_set_resolution() {
    let port = ScriptedConnector::frames(&["0003\r"]);
    let mut sensor = sensor(&port);

    sensor.set_resolution(75).unwrap();
    assert!(sensor.set_resolution(100).unwrap_err().is_invalid_argument());

    assert_eq!(port.sent(), vec!["RC03\r"]);
}

#[test]
fn test_load_settings_echo() {
    let port = ScriptedConnector::frames(&["0002\r", "0001\r"]);
    let mut sensor = sensor(&port);

    sensor.load_settings(2).unwrap();

    let err = sensor.load_settings(2).unwrap_err();
    assert!(matches!(
        err,
        kd6rmx::Error::Core(kd6rmx_core::Error::EchoMismatch {
            expected: 2,
            actual: 1
        })
    ));
    assert!(err.is_protocol_violation());
}

#[test]
fn test_save_settings() {
    let port = ScriptedConnector::frames(&["0081\r"]);
    let mut sensor = sensor(&port);

    sensor.save_settings(1).unwrap();
    assert!(sensor.save_settings(0).unwrap_err().is_invalid_argument());
    assert!(sensor.load_settings(4).unwrap_err().is_invalid_argument());

    assert_eq!(port.sent(), vec!["DT81\r"]);
}

#[test]
fn test_internal_sync_response_length() {
    let port = ScriptedConnector::frames(&["00001234\r", "0000\r"]);
    let mut sensor = sensor(&port);

    sensor.set_internal_sync(0x1234).unwrap();

    let err = sensor.set_internal_sync(0x1234).unwrap_err();
    assert!(matches!(
        err,
        kd6rmx::Error::Core(kd6rmx_core::Error::ShortResponse { expected: 5, .. })
    ));
    assert!(sensor.set_internal_sync(0).unwrap_err().is_invalid_argument());
}

#[test]
fn test_switches() {
    let port = ScriptedConnector::frames(&[
        "0001\r", "0021\r", "0000\r", "0021\r", "0001\r", "0001\r", "0021\r", "0041\r", "0001\r",
        "0002\r", "0040\r",
    ]);
    let mut sensor = sensor(&port);

    sensor.set_dark_correction(true).unwrap();
    sensor.perform_dark_correction().unwrap();
    sensor.set_white_correction(false).unwrap();
    sensor.perform_white_correction().unwrap();
    sensor.set_gain_amplifier(true).unwrap();
    sensor.set_test_pattern_output(true).unwrap();
    sensor.set_test_pattern(TestPattern::Ramp).unwrap();
    sensor.set_pixel_interpolation(true).unwrap();
    sensor.set_external_sync().unwrap();
    sensor.set_communication_speed(115_200).unwrap();
    sensor.set_white_correction_target(250).unwrap();

    assert_eq!(
        port.sent(),
        vec![
            "DC01\r", "DC21\r", "WC00\r", "WC21\r", "PG01\r", "TP01\r", "TP21\r", "OC41\r",
            "SS01\r", "BR02\r", "WC400FA0\r",
        ]
    );
}

#[test]
fn test_software_reset() {
    let port = ScriptedConnector::frames(&["0021\r", "0001\r"]);
    let mut sensor = sensor(&port).with_reset_settle(Duration::ZERO);

    sensor.software_reset().unwrap();

    assert_eq!(port.sent(), vec!["SR21\r", "SR01\r"]);
}

#[test]
fn test_read_register() {
    let port = ScriptedConnector::frames(&["000D\r", "0005\r", "000001F4\r"]);
    let mut sensor = sensor(&port);

    let freq = sensor.read_register(Register::OutputFrequency).unwrap();
    assert_eq!(freq.to_string(), "Frequency: 60.0 MHz");

    let led = sensor.read_register(Register::LedControl).unwrap();
    assert_eq!(led.to_string(), "Pulse 1/2: illumination A ON");

    let period = sensor.read_register_with_probe(Register::LedControl, 0xA0).unwrap();
    assert_eq!(period.to_string(), "LED period A: 500");

    assert_eq!(port.sent(), vec!["OF80\r", "LC80\r", "LCA0\r"]);
}

#[test]
fn test_read_register_rejects_write_parameter() {
    let port = ScriptedConnector::frames(&["0002\r", "0002\r"]);
    let mut sensor = sensor(&port);

    let err = sensor
        .read_register_with_probe(Register::CommunicationSpeed, 0x02)
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = sensor.read_register_with_probe(Register::OutputConfig, 0x0E).unwrap_err();
    assert!(err.is_invalid_argument());

    let err = sensor.read_register(Register::Gain).unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(port.sent().is_empty());
}

#[test]
fn test_invalid_pulse_divider_not_sent() {
    let port = ScriptedConnector::frames(&["0001\r"]);

    let err = sensor(&port).led_control(LedTarget::A, true, 3).unwrap_err();

    assert!(matches!(
        err,
        kd6rmx::Error::Core(kd6rmx_core::Error::InvalidArgument(_))
    ));
    assert!(port.sent().is_empty());
}

#[test]
fn test_read_register_device_status() {
    let port = ScriptedConnector::frames(&["010D\r"]);

    let err = sensor(&port).read_register(Register::OutputFrequency).unwrap_err();
    assert!(matches!(
        err,
        kd6rmx::Error::Core(kd6rmx_core::Error::DeviceStatus { status: 0x01, .. })
    ));
}

#[test]
fn test_read_register_unknown_code() {
    let port = ScriptedConnector::frames(&["0007\r"]);

    let err = sensor(&port).read_register(Register::Resolution).unwrap_err();
    assert!(matches!(
        err,
        kd6rmx::Error::Core(kd6rmx_core::Error::DecodeError { code: 0x07, .. })
    ));
}

#[test]
fn test_dump_registers() {
    let port = ScriptedConnector::frames(&[
        "0002\r",
        "000D\r",
        "0002\r",
        "0020\r",
        "0041\r",
        "0001\r",
        "0001\r",
        "0001\r",
        "000F\r",
        "000001F4\r",
        "000003E8\r",
        "0000\r",
        "0000\r",
        "0021\r",
    ]);

    let readings = sensor(&port).dump_registers().unwrap();

    assert_eq!(
        readings,
        vec![
            Reading::CommunicationSpeed(BaudRate::B115200),
            Reading::OutputFrequency(Frequency::from_tenths(600)),
            Reading::PixelFormat(PixelFormat::new(
                BitDepth::Bits10,
                Interface::Serial,
                OutputConfig::Medium,
                2
            )),
            Reading::PixelOverlap(false),
            Reading::PixelInterpolation(true),
            Reading::Resolution(Resolution::Dpi300),
            Reading::Sync(SyncMode::External),
            Reading::DarkCorrection(true),
            Reading::Led(LedState::on(LedTarget::AB, PulseDivider::Div8)),
            Reading::LedPeriod {
                target: LedTarget::A,
                value: 500
            },
            Reading::LedPeriod {
                target: LedTarget::B,
                value: 1000
            },
            Reading::WhiteCorrection(false),
            Reading::OutputMode(OutputMode::Image),
            Reading::TestPattern(TestPattern::Ramp),
        ]
    );
    assert_eq!(&port.sent()[2..5], &["OC80\r", "OCA0\r", "OCC0\r"]);
}

#[test]
fn test_dump_registers_fails_fast() {
    let port = ScriptedConnector::frames(&["0002\r", "00FF\r"]);

    let err = sensor(&port).dump_registers().unwrap_err();

    assert!(err.is_protocol_violation());
    assert_eq!(port.sent().len(), 2);
}

#[test]
fn test_send_raw() {
    let port = ScriptedConnector::frames(&["000D\r"]);
    let mut sensor = sensor(&port);

    let response = sensor.send_raw(Register::OutputFrequency, "0d").unwrap();
    assert_eq!(response.hex(), "000D");
    assert!(sensor.send_raw(Register::OutputFrequency, "0").unwrap_err().is_invalid_argument());

    assert_eq!(port.sent(), vec!["OF0D\r"]);
}

#[test]
fn test_timeout() {
    let port = ScriptedConnector::replying(&[Reply::Silent]);

    let err = sensor(&port).set_output_frequency(60.0).unwrap_err();

    assert!(err.is_timeout());
    assert!(err.is_transport_failure());
}

#[test]
fn test_empty_read() {
    let port = ScriptedConnector::replying(&[Reply::Empty]);

    let err = sensor(&port).set_output_frequency(60.0).unwrap_err();

    assert!(matches!(
        err,
        kd6rmx::Error::Transport(kd6rmx_transport::Error::EmptyRead)
    ));
    assert!(!err.is_timeout());
}

#[test]
fn test_short_response() {
    let port = ScriptedConnector::frames(&["00\r"]);

    let err = sensor(&port).set_output_frequency(60.0).unwrap_err();
    assert!(err.is_protocol_violation());
}

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<TrafficRecord>>,
}

impl TrafficSink for RecordingSink {
    fn record(&self, record: &TrafficRecord) {
        self.records.lock().push(record.clone());
    }
}

#[test]
fn test_traffic_sink() {
    let port = ScriptedConnector::frames(&["000D\r"]);
    let sink = Arc::new(RecordingSink::default());
    let mut sensor = sensor(&port).with_traffic_sink(sink.clone());

    sensor.set_output_frequency(60.0).unwrap();

    let records = sink.records.lock();
    let seen: Vec<_> = records.iter().map(|r| (r.direction, r.raw.as_str())).collect();
    assert_eq!(
        seen,
        vec![(Direction::Sent, "OF0D\r"), (Direction::Received, "000D\r")]
    );
}
