mod test_binary_frames_forwarded;
mod test_frames_scoped_to_room;
