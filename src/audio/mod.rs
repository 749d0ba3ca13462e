/// Beat detection over decoded audio, plus static beat lists.
pub mod beats;
/// `ffmpeg`-backed audio decoding to mono PCM.
pub mod decode;
