//! A stand-in "device" speaking just enough of the wire protocol to drive
//! the client through a scenario: plaintext and encrypted framing, the
//! responder side of the Noise handshake, and the handful of session
//! messages discovery/control round-trips exercise.

use esphome_client::frame;
use esphome_proto::codec::{read_varint, write_varint};
use esphome_proto::crypto::{CipherState, HandshakeResponder};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub async fn spawn_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

pub async fn accept(listener: &TcpListener) -> TcpStream {
    let (stream, _) = listener.accept().await.unwrap();
    stream
}

async fn read_varint_from_stream(stream: &mut TcpStream) -> u64 {
    let mut bytes = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        stream.read_exact(&mut byte).await.unwrap();
        bytes.push(byte[0]);
        if byte[0] & 0x80 == 0 {
            break;
        }
    }
    read_varint(&bytes).unwrap().0
}

/// Reads one `0x00`-framed message, returning `(message_type, body)`.
pub async fn read_plaintext(stream: &mut TcpStream) -> (u32, Vec<u8>) {
    let mut marker = [0u8; 1];
    stream.read_exact(&mut marker).await.unwrap();
    assert_eq!(marker[0], 0x00, "expected a plaintext frame marker");
    let length = read_varint_from_stream(stream).await as usize;
    let message_type = read_varint_from_stream(stream).await as u32;
    let mut body = vec![0u8; length];
    if length > 0 {
        stream.read_exact(&mut body).await.unwrap();
    }
    (message_type, body)
}

/// Writes one `0x00`-framed message.
pub async fn send_plaintext(stream: &mut TcpStream, message_type: u32, body: Vec<u8>) {
    let mut out = vec![0x00u8];
    write_varint(&mut out, body.len() as u64);
    write_varint(&mut out, message_type as u64);
    out.extend_from_slice(&body);
    stream.write_all(&out).await.unwrap();
}

/// Reads one `0x01`-framed raw ciphertext (handshake message or encrypted
/// payload, undecrypted).
pub async fn read_ciphertext_frame(stream: &mut TcpStream) -> Vec<u8> {
    let mut marker = [0u8; 1];
    stream.read_exact(&mut marker).await.unwrap();
    assert_eq!(marker[0], 0x01, "expected an encrypted frame marker");
    let mut size_bytes = [0u8; 2];
    stream.read_exact(&mut size_bytes).await.unwrap();
    let size = u16::from_be_bytes(size_bytes) as usize;
    let mut body = vec![0u8; size];
    stream.read_exact(&mut body).await.unwrap();
    body
}

pub async fn write_ciphertext_frame(stream: &mut TcpStream, body: &[u8]) {
    let mut out = vec![0x01u8];
    out.extend_from_slice(&(body.len() as u16).to_be_bytes());
    out.extend_from_slice(body);
    stream.write_all(&out).await.unwrap();
}

/// Plays the responder side of the handshake against whatever PSK the
/// client used to build its first message, mixing in `responder_psk` —
/// callers pass a mismatched key to exercise the wrong-PSK scenario.
/// Returns the device's own transport cipher pair: `.send` encrypts
/// device-to-client traffic, `.recv` decrypts client-to-device traffic.
pub async fn complete_responder_handshake(stream: &mut TcpStream, responder_psk: [u8; 32]) -> (CipherState, CipherState) {
    let message1 = read_ciphertext_frame(stream).await;
    let responder = HandshakeResponder::new(responder_psk);
    let (message2, keys) = responder.read_message_1_write_message_2(&message1).unwrap();
    write_ciphertext_frame(stream, &message2).await;
    (keys.send, keys.recv)
}

pub async fn send_encrypted(stream: &mut TcpStream, cipher: &mut CipherState, message_type: u32, body: &[u8]) {
    let payload = frame::encode_encrypted_payload(message_type, body);
    let ciphertext = cipher.encrypt_with_ad(&[], &payload).unwrap();
    write_ciphertext_frame(stream, &ciphertext).await;
}

pub async fn read_encrypted(stream: &mut TcpStream, cipher: &mut CipherState) -> (u32, Vec<u8>) {
    let ciphertext = read_ciphertext_frame(stream).await;
    let plaintext = cipher.decrypt_with_ad(&[], &ciphertext).unwrap();
    frame::decode_encrypted_payload(&plaintext).unwrap()
}
