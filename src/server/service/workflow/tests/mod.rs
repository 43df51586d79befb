mod progression;
